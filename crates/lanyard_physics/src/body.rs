//! Body-Beschreibungen und interner Body-Zustand.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Opaker Bezeichner eines registrierten Bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    /// Index in der Body-Liste der Welt.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Simulationsmodus eines Bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Unbeweglich, unendliche Masse
    Fixed,
    /// Von Schwerkraft und Joints getrieben
    Dynamic,
    /// Pose wird pro Step extern vorgegeben
    KinematicPosition,
}

/// Kollisionsform, nur für Masse und Trägheit ausgewertet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Kein Collider, Einheitsmasse
    None,
    /// Kugel mit Radius
    Ball { radius: f32 },
    /// Quader mit halben Kantenlängen
    Cuboid { half_extents: Vec3 },
}

impl ColliderShape {
    /// Dichte aller Collider (wie Rapier-Standard).
    const DENSITY: f32 = 1.0;

    /// Masse bei Standarddichte. `None` → 1.0.
    pub fn mass(&self) -> f32 {
        match *self {
            Self::None => 1.0,
            Self::Ball { radius } => {
                Self::DENSITY * 4.0 / 3.0 * std::f32::consts::PI * radius.powi(3)
            }
            Self::Cuboid { half_extents } => {
                Self::DENSITY * 8.0 * half_extents.x * half_extents.y * half_extents.z
            }
        }
    }

    /// Skalares (isotrop gemitteltes) Trägheitsmoment.
    pub fn inertia(&self) -> f32 {
        let mass = self.mass();
        match *self {
            Self::None => mass,
            Self::Ball { radius } => 0.4 * mass * radius * radius,
            // Mittelwert der drei Hauptachsen: m (hy²+hz²)/3 usw.
            Self::Cuboid { half_extents } => 2.0 * mass * half_extents.length_squared() / 9.0,
        }
    }
}

/// Beschreibung eines Bodies vor der Registrierung.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    /// Startposition in Welt-Koordinaten
    pub position: Vec3,
    /// Startrotation
    pub rotation: Quat,
    /// Simulationsmodus
    pub kind: BodyKind,
    /// Kollisionsform (Masse/Trägheit)
    pub collider: ColliderShape,
    /// Lineare Dämpfung (1/s)
    pub linear_damping: f32,
    /// Winkel-Dämpfung (1/s)
    pub angular_damping: f32,
    /// Darf der Body einschlafen
    pub can_sleep: bool,
}

impl BodyDesc {
    /// Dynamischer Body ohne Collider an `position`.
    pub fn dynamic(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            kind: BodyKind::Dynamic,
            collider: ColliderShape::None,
            linear_damping: 0.0,
            angular_damping: 0.0,
            can_sleep: true,
        }
    }

    /// Fixierter Body an `position`.
    pub fn fixed(position: Vec3) -> Self {
        Self {
            kind: BodyKind::Fixed,
            ..Self::dynamic(position)
        }
    }

    /// Setzt den Collider.
    pub fn with_collider(mut self, collider: ColliderShape) -> Self {
        self.collider = collider;
        self
    }

    /// Setzt lineare und Winkel-Dämpfung.
    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Setzt, ob der Body einschlafen darf.
    pub fn with_can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }
}

/// Interner Zustand eines Bodies in der `ChainWorld`.
#[derive(Debug, Clone)]
pub(crate) struct RigidBody {
    pub position: Vec3,
    pub prev_position: Vec3,
    pub rotation: Quat,
    pub prev_rotation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub kind: BodyKind,
    pub mass: f32,
    pub inertia: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub can_sleep: bool,
    pub sleeping: bool,
    pub sleep_timer: f32,
    pub kinematic_target: Option<Vec3>,
}

impl RigidBody {
    pub fn from_desc(desc: &BodyDesc) -> Self {
        Self {
            position: desc.position,
            prev_position: desc.position,
            rotation: desc.rotation,
            prev_rotation: desc.rotation,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            kind: desc.kind,
            mass: desc.collider.mass(),
            inertia: desc.collider.inertia(),
            linear_damping: desc.linear_damping,
            angular_damping: desc.angular_damping,
            can_sleep: desc.can_sleep,
            sleeping: false,
            sleep_timer: 0.0,
            kinematic_target: None,
        }
    }

    /// Inverse Masse für den Solver (0 für Fixed/Kinematic).
    pub fn inv_mass(&self) -> f32 {
        match self.kind {
            BodyKind::Dynamic if self.mass > f32::EPSILON => 1.0 / self.mass,
            _ => 0.0,
        }
    }

    /// Inverses skalares Trägheitsmoment (0 für Fixed/Kinematic).
    pub fn inv_inertia(&self) -> f32 {
        match self.kind {
            BodyKind::Dynamic if self.inertia > f32::EPSILON => 1.0 / self.inertia,
            _ => 0.0,
        }
    }

    pub fn wake(&mut self) {
        self.sleeping = false;
        self.sleep_timer = 0.0;
    }

    /// Body nimmt an Integration und Solver teil.
    pub fn is_active(&self) -> bool {
        !self.sleeping && self.kind != BodyKind::Fixed
    }

    /// Lokalen Anker in Welt-Offset (relativ zur Body-Position) drehen.
    pub fn world_offset(&self, local_anchor: Vec3) -> Vec3 {
        self.rotation * local_anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ball_mass_matches_sphere_volume() {
        let ball = ColliderShape::Ball { radius: 0.1 };
        assert_relative_eq!(ball.mass(), 4.0 / 3.0 * std::f32::consts::PI * 0.001);
    }

    #[test]
    fn test_cuboid_mass_uses_full_extents() {
        let cuboid = ColliderShape::Cuboid {
            half_extents: Vec3::new(0.2, 0.31, 0.01),
        };
        assert_relative_eq!(cuboid.mass(), 8.0 * 0.2 * 0.31 * 0.01, epsilon = 1e-7);
    }

    #[test]
    fn test_fixed_and_kinematic_have_infinite_mass() {
        let mut body = RigidBody::from_desc(&BodyDesc::fixed(Vec3::ZERO));
        assert_eq!(body.inv_mass(), 0.0);
        body.kind = BodyKind::KinematicPosition;
        assert_eq!(body.inv_mass(), 0.0);
        assert_eq!(body.inv_inertia(), 0.0);
        body.kind = BodyKind::Dynamic;
        assert_relative_eq!(body.inv_mass(), 1.0);
    }
}
