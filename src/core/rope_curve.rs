//! Catmull-Rom-Kurve des Seils durch vier Kontrollpunkte.
//!
//! Die Reihenfolge der Kontrollpunkte ist fest:
//! Karten-Glied → nahes geglättetes Glied → fernes geglättetes Glied → Anker.
//! Die Kurvenform hängt von dieser Reihenfolge ab; die Punkte werden daher
//! nur über [`RopeCurve::set_points`] mit benannten Parametern gesetzt.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Anzahl Kontrollpunkte der Seilkurve.
pub const ROPE_CONTROL_POINTS: usize = 4;
/// Anzahl Abtastpunkte pro Frame.
pub const ROPE_SAMPLE_COUNT: usize = 64;

/// Unterhalb dieses Parameterabstands gilt ein Segment als entartet.
const DEGENERATE_SPACING: f32 = 1e-4;

/// Parametrisierung der Catmull-Rom-Kurve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurveKind {
    /// Knotenabstand √|Δ| (α = 0.5)
    Centripetal,
    /// Knotenabstand |Δ| (α = 1.0)
    #[default]
    Chordal,
    /// Uniforme Parametrisierung mit Tension
    CatmullRom { tension: f32 },
}

impl CurveKind {
    /// Exponent auf den quadrierten Punktabstand (für nicht-uniforme Varianten).
    fn squared_distance_power(self) -> Option<f32> {
        match self {
            Self::Centripetal => Some(0.25),
            Self::Chordal => Some(0.5),
            Self::CatmullRom { .. } => None,
        }
    }
}

/// Kubisches Polynom `c0 + c1 t + c2 t² + c3 t³` in 3D.
#[derive(Debug, Clone, Copy)]
struct CubicPoly {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicPoly {
    /// Hermite-Form aus Endpunkten und Tangenten.
    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn uniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, tension: f32) -> Self {
        Self::hermite(p1, p2, tension * (p2 - p0), tension * (p3 - p1))
    }

    fn non_uniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, dt0: f32, dt1: f32, dt2: f32) -> Self {
        let t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
        let t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
        Self::hermite(p1, p2, t1 * dt1, t2 * dt1)
    }

    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

/// Berechnet einen Punkt auf einem Catmull-Rom-Segment (t ∈ [0, 1]).
///
/// p0, p1, p2, p3: vier aufeinanderfolgende Kontrollpunkte.
/// Die Kurve verläuft von p1 nach p2.
pub fn catmull_rom_point(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32, kind: CurveKind) -> Vec3 {
    let poly = match kind.squared_distance_power() {
        Some(power) => {
            let mut dt0 = p0.distance_squared(p1).powf(power);
            let mut dt1 = p1.distance_squared(p2).powf(power);
            let mut dt2 = p2.distance_squared(p3).powf(power);

            // Zusammenfallende Punkte: auf Nachbar-Abstand ausweichen
            if dt1 < DEGENERATE_SPACING {
                dt1 = 1.0;
            }
            if dt0 < DEGENERATE_SPACING {
                dt0 = dt1;
            }
            if dt2 < DEGENERATE_SPACING {
                dt2 = dt1;
            }
            CubicPoly::non_uniform(p0, p1, p2, p3, dt0, dt1, dt2)
        }
        None => {
            let tension = match kind {
                CurveKind::CatmullRom { tension } => tension,
                _ => 0.5,
            };
            CubicPoly::uniform(p0, p1, p2, p3, tension)
        }
    };
    poly.eval(t)
}

/// Approximierte Länge einer Polyline.
pub fn polyline_length(points: &[Vec3]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Offene Seilkurve durch genau vier Kontrollpunkte.
#[derive(Debug, Clone, PartialEq)]
pub struct RopeCurve {
    points: [Vec3; ROPE_CONTROL_POINTS],
    kind: CurveKind,
}

impl RopeCurve {
    /// Erstellt eine Kurve mit allen Kontrollpunkten im Ursprung.
    pub fn new(kind: CurveKind) -> Self {
        Self {
            points: [Vec3::ZERO; ROPE_CONTROL_POINTS],
            kind,
        }
    }

    /// Parametrisierung der Kurve.
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Setzt alle Kontrollpunkte in der festen Seil-Reihenfolge.
    pub fn set_points(
        &mut self,
        card_joint: Vec3,
        near_joint: Vec3,
        far_joint: Vec3,
        anchor: Vec3,
    ) {
        self.points = [card_joint, near_joint, far_joint, anchor];
    }

    /// Kontrollpunkte in Kurven-Reihenfolge.
    pub fn points(&self) -> &[Vec3; ROPE_CONTROL_POINTS] {
        &self.points
    }

    /// Punkt auf der Gesamtkurve (t ∈ [0, 1], wird geklemmt).
    pub fn point_at(&self, t: f32) -> Vec3 {
        let pts = &self.points;
        let last = ROPE_CONTROL_POINTS - 1;
        let p = last as f32 * t.clamp(0.0, 1.0);

        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;
        if segment >= last {
            segment = last - 1;
            weight = 1.0;
        }

        // Phantom-Punkte an den Rändern gespiegelt
        let p0 = if segment > 0 {
            pts[segment - 1]
        } else {
            2.0 * pts[0] - pts[1]
        };
        let p1 = pts[segment];
        let p2 = pts[segment + 1];
        let p3 = if segment + 2 <= last {
            pts[segment + 2]
        } else {
            2.0 * pts[last] - pts[last - 1]
        };

        catmull_rom_point(p0, p1, p2, p3, weight, self.kind)
    }

    /// Tastet die Kurve mit `count` Punkten von t=0 bis t=1 (inklusive) ab.
    pub fn sample(&self, count: usize) -> Vec<Vec3> {
        let mut out = Vec::with_capacity(count);
        self.sample_into(&mut out, count);
        out
    }

    /// Wie [`Self::sample`], schreibt aber in einen wiederverwendeten Buffer.
    pub fn sample_into(&self, out: &mut Vec<Vec3>, count: usize) {
        out.clear();
        match count {
            0 => {}
            1 => out.push(self.point_at(0.0)),
            _ => {
                let divisions = (count - 1) as f32;
                out.extend((0..count).map(|i| self.point_at(i as f32 / divisions)));
            }
        }
    }
}

impl Default for RopeCurve {
    fn default() -> Self {
        Self::new(CurveKind::default())
    }
}
