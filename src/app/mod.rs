//! Application-Layer: Controller, Drag-Zustand und Events.

pub mod controller;
pub mod cursor;
pub mod drag;
pub mod events;
pub mod render_scene;
pub mod throttle;

pub use controller::{FrameOutput, FrameState, LanyardController};
pub use cursor::CursorScope;
pub use drag::{DragController, DragPhase, DragTransition};
pub use events::PointerEvent;
pub use render_scene::build as build_render_scene;
pub use throttle::WakeThrottle;
