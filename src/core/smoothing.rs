//! Verzögerte (geglättete) Glied-Positionen für die Seil-Darstellung.
//!
//! Das Seil soll nicht starr an den Simulationspositionen kleben. Pro Glied
//! wird eine eigene, nachlaufende Position geführt, die der echten Position
//! mit distanzabhängiger Geschwindigkeit folgt: große Abweichungen holen
//! schnell auf, kleine klingen langsam aus.
//!
//! Die Tabelle gehört dem Frame-Loop und wird nie von Event-Handlern oder
//! vom Simulator geschrieben.

use glam::Vec3;
use indexmap::IndexMap;
use lanyard_physics::BodyHandle;

/// Minimale Nachlauf-Geschwindigkeit (1/s).
pub const DEFAULT_MIN_SPEED: f32 = 10.0;
/// Maximale Nachlauf-Geschwindigkeit (1/s).
pub const DEFAULT_MAX_SPEED: f32 = 50.0;
/// Untere Klemmgrenze der Abweichung.
pub const DISTANCE_CLAMP_MIN: f32 = 0.1;
/// Obere Klemmgrenze der Abweichung.
pub const DISTANCE_CLAMP_MAX: f32 = 1.0;

/// Geglätteter Zustand eines Glieds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedJoint {
    /// Nachlaufende Position
    pub position: Vec3,
    /// Anzahl bisheriger Updates
    pub updates: u64,
}

/// Seitentabelle `Glied → geglättete Position`.
#[derive(Debug, Clone)]
pub struct LagFilter {
    min_speed: f32,
    max_speed: f32,
    joints: IndexMap<BodyHandle, SmoothedJoint>,
}

impl LagFilter {
    /// Erstellt einen Filter mit den gegebenen Geschwindigkeitsgrenzen.
    pub fn new(min_speed: f32, max_speed: f32) -> Self {
        Self {
            min_speed,
            max_speed,
            joints: IndexMap::new(),
        }
    }

    /// Nachlauf-Geschwindigkeit für eine Abweichung.
    pub fn lerp_speed(&self, distance: f32) -> f32 {
        lerp_speed(self.min_speed, self.max_speed, distance)
    }

    /// Interpolationsanteil eines Frames, begrenzt auf [0, 1].
    pub fn lerp_fraction(&self, distance: f32, delta: f32) -> f32 {
        lerp_fraction(self.min_speed, self.max_speed, distance, delta)
    }

    /// Zieht die geglättete Position eines Glieds Richtung `actual`.
    ///
    /// Beim ersten Aufruf für ein Glied startet die Glättung ohne Fehler
    /// direkt auf `actual`. Ein nicht endliches `delta` lässt die Position
    /// unverändert.
    pub fn update(&mut self, joint: BodyHandle, actual: Vec3, delta: f32) -> Vec3 {
        let (min_speed, max_speed) = (self.min_speed, self.max_speed);
        let entry = self.joints.entry(joint).or_insert_with(|| {
            log::trace!("Glättung für {:?} initialisiert", joint);
            SmoothedJoint {
                position: actual,
                updates: 0,
            }
        });

        if !delta.is_finite() {
            log::debug!("Glättung für {:?} übersprungen: delta = {}", joint, delta);
            return entry.position;
        }

        let distance = entry.position.distance(actual);
        let fraction = lerp_fraction(min_speed, max_speed, distance, delta);

        entry.position = entry.position.lerp(actual, fraction);
        entry.updates += 1;
        entry.position
    }

    /// Geglättete Position eines Glieds, falls bereits initialisiert.
    pub fn get(&self, joint: BodyHandle) -> Option<Vec3> {
        self.joints.get(&joint).map(|j| j.position)
    }

    /// Vollständiger Eintrag eines Glieds.
    pub fn entry(&self, joint: BodyHandle) -> Option<&SmoothedJoint> {
        self.joints.get(&joint)
    }

    /// Entfernt ein Glied aus der Tabelle.
    pub fn forget(&mut self, joint: BodyHandle) -> Option<SmoothedJoint> {
        self.joints.shift_remove(&joint)
    }

    /// Leert die Tabelle (Unmount).
    pub fn clear(&mut self) {
        self.joints.clear();
    }

    /// Anzahl geführter Glieder.
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// `true`, wenn noch kein Glied geführt wird.
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}

impl Default for LagFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SPEED, DEFAULT_MAX_SPEED)
    }
}

fn lerp_speed(min_speed: f32, max_speed: f32, distance: f32) -> f32 {
    let clamped = distance.clamp(DISTANCE_CLAMP_MIN, DISTANCE_CLAMP_MAX);
    min_speed + clamped * (max_speed - min_speed)
}

fn lerp_fraction(min_speed: f32, max_speed: f32, distance: f32, delta: f32) -> f32 {
    (delta * lerp_speed(min_speed, max_speed, distance)).clamp(0.0, 1.0)
}
