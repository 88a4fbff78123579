//! Pointer-Events, wie sie der Host an den Controller meldet.

use glam::{Vec2, Vec3};

use crate::shared::PointerId;

/// Pointer-Ereignis bezogen auf die Karten-Hit-Region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer betritt die Karte
    Enter,
    /// Pointer verlässt die Karte
    Leave,
    /// Pointer gedrückt auf der Karte
    Down {
        /// Kennung des Pointers
        pointer_id: PointerId,
        /// Trefferpunkt in Welt-Koordinaten
        hit_point: Vec3,
    },
    /// Pointer bewegt (normalisierte Gerätekoordinaten, -1..1)
    Move {
        /// Pointer-Position in NDC
        ndc: Vec2,
    },
    /// Pointer losgelassen
    Up {
        /// Kennung des Pointers
        pointer_id: PointerId,
    },
    /// Host hat die Pointer-Capture entzogen
    CaptureLost {
        /// Kennung des Pointers
        pointer_id: PointerId,
    },
}
