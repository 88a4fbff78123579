//! Render-Szene als expliziter Übergabevertrag zwischen App und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und `render` sie konsumiert.

use glam::{Quat, Vec3};

/// Kennung eines Pointers (Maus, Touch, Stift).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

/// Mauszeiger-Form über der Karte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    /// Standard-Cursor des Hosts
    #[default]
    Auto,
    /// Karte greifbar (Hover)
    Grab,
    /// Karte wird gezogen
    Grabbing,
}

/// Pose des Karten-Bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    /// Position in Welt-Koordinaten
    pub translation: Vec3,
    /// Rotation
    pub rotation: Quat,
}

impl Default for CardPose {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone, Default)]
pub struct LanyardScene {
    /// Laufende Frame-Nummer
    pub frame: u64,
    /// Abgetastete Seilkurve (Karte → Anker)
    pub rope_points: Vec<Vec3>,
    /// Pose der Karte (`None`, wenn der Body fehlt)
    pub card_pose: Option<CardPose>,
    /// Karte wird gerade gezogen
    pub dragging: bool,
    /// Pointer liegt über der Karte
    pub hovered: bool,
    /// Gewünschter Cursor
    pub cursor: CursorIcon,
}

impl LanyardScene {
    /// Gibt zurück, ob das Seil für diesen Frame gezeichnet werden kann.
    pub fn has_rope(&self) -> bool {
        self.rope_points.len() >= 2
    }
}
