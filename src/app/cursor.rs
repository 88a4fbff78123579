//! Besitz des Host-Cursors.

use crate::render::SceneRenderer;
use crate::shared::CursorIcon;

/// Verwaltet den Cursor, solange die Karte ihn beansprucht.
///
/// Schreibt nur bei Änderungen. Wird der Cursor beim Abbau des Controllers
/// noch gehalten, setzt [`CursorScope::release`] ihn auf `Auto` zurück.
#[derive(Debug, Clone, Default)]
pub struct CursorScope {
    current: CursorIcon,
    writes: u64,
}

impl CursorScope {
    /// Erstellt eine Scope ohne beanspruchten Cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zuletzt geschriebener Cursor.
    pub fn current(&self) -> CursorIcon {
        self.current
    }

    /// Hält die Scope gerade einen Nicht-Standard-Cursor?
    pub fn is_acquired(&self) -> bool {
        self.current != CursorIcon::Auto
    }

    /// Anzahl tatsächlicher Schreibzugriffe auf den Host.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Setzt den gewünschten Cursor, falls er sich geändert hat.
    pub fn apply<R: SceneRenderer>(&mut self, desired: CursorIcon, host: &mut R) {
        if self.current == desired {
            return;
        }
        log::trace!("Cursor: {:?} -> {:?}", self.current, desired);
        host.set_cursor(desired);
        self.current = desired;
        self.writes += 1;
    }

    /// Gibt den Cursor frei (zurück auf `Auto`).
    pub fn release<R: SceneRenderer>(&mut self, host: &mut R) {
        self.apply(CursorIcon::Auto, host);
    }
}
