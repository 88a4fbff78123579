//! Core-Domänentypen: Rig, Glättung, Seilkurve, Kamera.
//!
//! Reine Berechnungen ohne Renderer- oder Eingabe-Abhängigkeit.

pub mod camera;
pub mod rig;
pub mod rope_curve;
pub mod smoothing;

pub use camera::{PerspectiveCamera, Ray};
pub use rig::{RigHandles, RigLayout};
pub use rope_curve::{
    CurveKind, ROPE_CONTROL_POINTS, ROPE_SAMPLE_COUNT, RopeCurve, catmull_rom_point,
    polyline_length,
};
pub use smoothing::{LagFilter, SmoothedJoint};
