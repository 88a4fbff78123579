//! Renderer ohne GPU: zeichnet Aufrufe auf.
//!
//! Dient Demo-Binary, Tests und Benchmarks als Host.

use glam::Vec2;

use super::{CardHit, CardHitRegion, CardSurface, RibbonGeometry, SceneRenderer};
use crate::core::PerspectiveCamera;
use crate::shared::{CursorIcon, LanyardOptions, LanyardScene, PointerId};

/// Aufgezeichneter Host-Aufruf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    /// Cursor gesetzt
    Cursor(CursorIcon),
    /// Pointer eingefangen
    Capture(PointerId),
    /// Pointer freigegeben
    Release(PointerId),
}

/// Headless-Renderer mit Aufzeichnung aller Host-Aufrufe.
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    camera: PerspectiveCamera,
    hit_region: CardHitRegion,
    surfaces: [CardSurface; 2],
    ribbon: RibbonGeometry,
    calls: Vec<HostCall>,
    captured: Option<PointerId>,
    cursor: CursorIcon,
    last_scene: Option<LanyardScene>,
    frames_submitted: u64,
}

impl HeadlessRenderer {
    /// Erstellt einen Renderer mit Kamera und Kartengeometrie aus den Optionen.
    pub fn new(options: &LanyardOptions) -> Self {
        Self {
            camera: options.camera(),
            hit_region: CardHitRegion::from_options(options),
            surfaces: CardSurface::pair(options),
            ribbon: RibbonGeometry::default(),
            calls: Vec::new(),
            captured: None,
            cursor: CursorIcon::Auto,
            last_scene: None,
            frames_submitted: 0,
        }
    }

    /// Alle bisherigen Host-Aufrufe in Reihenfolge.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Nur die Cursor-Wechsel.
    pub fn cursor_history(&self) -> Vec<CursorIcon> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Cursor(icon) => Some(*icon),
                _ => None,
            })
            .collect()
    }

    /// Aktueller Cursor.
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Aktuell eingefangener Pointer.
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.captured
    }

    /// Zuletzt übergebene Szene.
    pub fn last_scene(&self) -> Option<&LanyardScene> {
        self.last_scene.as_ref()
    }

    /// Band-Geometrie des letzten Frames.
    pub fn ribbon(&self) -> &RibbonGeometry {
        &self.ribbon
    }

    /// Kartenflächen (Vorder- und Rückseite).
    pub fn surfaces(&self) -> &[CardSurface; 2] {
        &self.surfaces
    }

    /// Anzahl übergebener Frames.
    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    /// Pointer-Test gegen die Karte der zuletzt übergebenen Szene.
    pub fn hit_test(&self, ndc: Vec2) -> Option<CardHit> {
        let pose = self.last_scene.as_ref()?.card_pose?;
        let ray = self.camera.ray_from_ndc(ndc);
        self.hit_region.intersect(&ray, &pose)
    }
}

impl SceneRenderer for HeadlessRenderer {
    fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    fn set_cursor(&mut self, icon: CursorIcon) {
        self.cursor = icon;
        self.calls.push(HostCall::Cursor(icon));
    }

    fn set_pointer_capture(&mut self, pointer: PointerId) {
        self.captured = Some(pointer);
        self.calls.push(HostCall::Capture(pointer));
    }

    fn release_pointer_capture(&mut self, pointer: PointerId) {
        if self.captured == Some(pointer) {
            self.captured = None;
        }
        self.calls.push(HostCall::Release(pointer));
    }

    fn submit(&mut self, scene: &LanyardScene) {
        self.ribbon.rebuild(&scene.rope_points);
        self.frames_submitted += 1;
        log::trace!(
            "Frame {} übergeben: {} Seilpunkte, {} Dreiecke",
            scene.frame,
            scene.rope_points.len(),
            self.ribbon.triangle_count()
        );
        self.last_scene = Some(scene.clone());
    }
}
