//! Builder für Render-Szenen aus dem Controller-Zustand.

use glam::Vec3;

use super::drag::DragController;
use crate::shared::{CardPose, LanyardScene};

/// Baut eine LanyardScene für einen Frame.
pub fn build(
    frame: u64,
    rope_points: &[Vec3],
    card_pose: Option<CardPose>,
    drag: &DragController,
) -> LanyardScene {
    LanyardScene {
        frame,
        rope_points: rope_points.to_vec(),
        card_pose,
        dragging: drag.is_dragging(),
        hovered: drag.is_hovered(),
        cursor: drag.cursor(),
    }
}
