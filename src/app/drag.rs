//! Zustandsautomat für Hover und Drag der Karte.
//!
//! Der Automat kennt weder Simulator noch Host. Er liefert eine
//! [`DragTransition`], die der Controller in Seiteneffekte übersetzt.

use glam::Vec3;

use super::events::PointerEvent;
use crate::shared::{CursorIcon, PointerId};

/// Drag-Phase der Karte.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    /// Kein Pointer über der Karte
    #[default]
    Idle,
    /// Pointer über der Karte, nicht gedrückt
    Hovering,
    /// Karte wird gezogen
    Dragging {
        /// Versatz Trefferpunkt − Kartenposition beim Pointer-Down
        grab_offset: Vec3,
    },
}

/// Ergebnis eines verarbeiteten Events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTransition {
    /// Keine Änderung
    None,
    /// Hover-Status hat sich geändert
    HoverChanged {
        /// Neuer Hover-Status
        hovered: bool,
    },
    /// Drag beginnt: Pointer einfangen, Karte kinematisch schalten
    Started {
        /// Eingefangener Pointer
        pointer_id: PointerId,
        /// Versatz Trefferpunkt − Kartenposition
        grab_offset: Vec3,
    },
    /// Drag endet: Pointer freigeben, Karte dynamisch schalten
    Released {
        /// Freizugebender Pointer
        pointer_id: PointerId,
    },
}

/// Hover- und Drag-Zustand.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    phase: DragPhase,
    hovered: bool,
    pointer: Option<PointerId>,
}

impl DragController {
    /// Erstellt einen Controller in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktuelle Phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Liegt der Pointer über der Karte?
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Wird gerade gezogen?
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Grab-Offset des laufenden Drags.
    pub fn grab_offset(&self) -> Option<Vec3> {
        match self.phase {
            DragPhase::Dragging { grab_offset } => Some(grab_offset),
            _ => None,
        }
    }

    /// Eingefangener Pointer des laufenden Drags.
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    /// Gewünschter Cursor für den aktuellen Zustand.
    pub fn cursor(&self) -> CursorIcon {
        match (self.hovered, self.is_dragging()) {
            (true, true) => CursorIcon::Grabbing,
            (true, false) => CursorIcon::Grab,
            (false, _) => CursorIcon::Auto,
        }
    }

    /// Verarbeitet ein Pointer-Event.
    ///
    /// `card_translation` ist die aktuelle Kartenposition; fehlt sie, wird
    /// kein Drag gestartet.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        card_translation: Option<Vec3>,
    ) -> DragTransition {
        match event {
            PointerEvent::Enter => self.set_hovered(true),
            PointerEvent::Leave => self.set_hovered(false),
            PointerEvent::Move { .. } => DragTransition::None,
            PointerEvent::Down {
                pointer_id,
                hit_point,
            } => {
                if self.is_dragging() {
                    return DragTransition::None;
                }
                let Some(card) = card_translation else {
                    log::debug!("Pointer-Down ohne Karten-Body ignoriert");
                    return DragTransition::None;
                };
                let grab_offset = hit_point - card;
                // Down kommt nur aus der Hit-Region
                self.hovered = true;
                self.phase = DragPhase::Dragging { grab_offset };
                self.pointer = Some(pointer_id);
                log::debug!("Drag gestartet: Pointer {:?}, Offset {:?}", pointer_id, grab_offset);
                DragTransition::Started {
                    pointer_id,
                    grab_offset,
                }
            }
            PointerEvent::Up { pointer_id } | PointerEvent::CaptureLost { pointer_id } => {
                self.release(pointer_id)
            }
        }
    }

    fn set_hovered(&mut self, hovered: bool) -> DragTransition {
        if self.hovered == hovered {
            return DragTransition::None;
        }
        self.hovered = hovered;
        if !self.is_dragging() {
            self.phase = if hovered {
                DragPhase::Hovering
            } else {
                DragPhase::Idle
            };
        }
        DragTransition::HoverChanged { hovered }
    }

    fn release(&mut self, pointer_id: PointerId) -> DragTransition {
        if !self.is_dragging() || self.pointer != Some(pointer_id) {
            return DragTransition::None;
        }
        self.pointer = None;
        self.phase = if self.hovered {
            DragPhase::Hovering
        } else {
            DragPhase::Idle
        };
        log::debug!("Drag beendet: Pointer {:?} -> {:?}", pointer_id, self.phase);
        DragTransition::Released { pointer_id }
    }
}
