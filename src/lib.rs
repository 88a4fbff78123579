//! Lanyard-Karten-Widget: eine Karte an einem physikalisch simulierten Band.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod render;
pub mod shared;

pub use app::{
    DragController, DragPhase, FrameOutput, FrameState, LanyardController, PointerEvent,
    WakeThrottle,
};
pub use core::{CurveKind, LagFilter, PerspectiveCamera, RigHandles, RigLayout, RopeCurve};
pub use render::{CardSurface, HeadlessRenderer, RibbonGeometry, SceneRenderer};
pub use shared::{CardPose, CursorIcon, LanyardOptions, LanyardScene, PointerId};
