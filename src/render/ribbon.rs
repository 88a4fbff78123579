//! Band-Geometrie im MeshLine-Stil.
//!
//! Jeder Kurvenpunkt wird zu zwei Vertices (Seite -1/+1) dupliziert.
//! Die Verbreiterung auf `line_width` passiert im Vertex-Shader anhand
//! von `previous`/`next` in Bildschirmkoordinaten.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::shared::LanyardOptions;

/// Vertex des Bands.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RibbonVertex {
    /// Kurvenpunkt
    pub position: [f32; 3],
    /// Vorheriger Kurvenpunkt (am Anfang: der Punkt selbst)
    pub previous: [f32; 3],
    /// Nächster Kurvenpunkt (am Ende: der Punkt selbst)
    pub next: [f32; 3],
    /// Seite der Verbreiterung (-1 oder +1)
    pub side: f32,
    /// Relativer Fortschritt entlang der Kurve (0..1)
    pub counter: f32,
    /// Texturkoordinate vor Anwendung der Wiederholung
    pub uv: [f32; 2],
}

/// Uniform-Block des Band-Shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RibbonUniforms {
    /// Textur-Wiederholung (entlang, quer)
    pub repeat: [f32; 2],
    /// Viewport-Auflösung in Pixeln
    pub resolution: [f32; 2],
    /// Linienbreite
    pub line_width: f32,
    _pad: [f32; 3],
}

impl RibbonUniforms {
    /// Uniforms aus den Optionen für einen Viewport.
    pub fn new(options: &LanyardOptions, resolution: Vec2) -> Self {
        Self {
            repeat: options.band_texture_repeat,
            resolution: resolution.to_array(),
            line_width: options.band_line_width,
            _pad: [0.0; 3],
        }
    }
}

/// Vertex- und Index-Daten eines Bands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonGeometry {
    /// Vertices (2 pro Kurvenpunkt)
    pub vertices: Vec<RibbonVertex>,
    /// Dreiecks-Indizes (6 pro Segment)
    pub indices: Vec<u32>,
}

impl RibbonGeometry {
    /// Baut die Band-Geometrie für eine Punktfolge neu auf.
    ///
    /// Weniger als zwei Punkte ergeben eine leere Geometrie.
    pub fn rebuild(&mut self, points: &[Vec3]) {
        self.vertices.clear();
        self.indices.clear();
        if points.len() < 2 {
            return;
        }

        let last = points.len() - 1;
        for (i, point) in points.iter().enumerate() {
            let previous = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(last)];
            let counter = i as f32 / last as f32;
            for (side, v) in [(-1.0, 0.0), (1.0, 1.0)] {
                self.vertices.push(RibbonVertex {
                    position: point.to_array(),
                    previous: previous.to_array(),
                    next: next.to_array(),
                    side,
                    counter,
                    uv: [counter, v],
                });
            }
        }

        for segment in 0..last as u32 {
            let base = segment * 2;
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
        }
    }

    /// Erstellt eine neue Geometrie aus einer Punktfolge.
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut geometry = Self::default();
        geometry.rebuild(points);
        geometry
    }

    /// Anzahl Dreiecke.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Gibt zurück, ob keine Geometrie vorhanden ist.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
