//! Deklaration der Constraint-Kette: Anker, drei Seilglieder, Karte.
//!
//! Das Rig wird einmalig beim Mount im Simulator registriert. Gelöst wird
//! ausschließlich vom Simulator, hier liegt nur die Konfiguration.

use glam::Vec3;
use lanyard_physics::{
    BodyDesc, BodyHandle, BodyKind, ColliderShape, JointDesc, PhysicsError, RigidBodySimulator,
};

/// Höhe des Ankers über der Rig-Position.
pub const ANCHOR_HEIGHT: f32 = 4.0;
/// Maximale Länge eines Seilsegments.
pub const SEGMENT_LENGTH: f32 = 0.8;
/// Horizontaler Abstand der Glieder in der Startpose.
pub const JOINT_SPACING: f32 = 0.5;
/// Radius der Kugel-Collider der Seilglieder.
pub const JOINT_RADIUS: f32 = 0.1;
/// Halbe Kantenlängen des Karten-Colliders.
pub const CARD_HALF_EXTENTS: Vec3 = Vec3::new(0.2, 0.31, 0.01);
/// Lokaler Anker des Kugelgelenks auf der Karte.
pub const CARD_JOINT_ANCHOR: Vec3 = Vec3::new(0.0, 1.05, 0.0);
/// Lineare und Winkel-Dämpfung aller Rig-Bodies.
pub const SEGMENT_DAMPING: f32 = 3.0;

/// Geometrie und Body-Parameter des Rigs.
#[derive(Debug, Clone, PartialEq)]
pub struct RigLayout {
    /// Rig-Position (der Anker liegt `ANCHOR_HEIGHT` darüber)
    pub position: Vec3,
    /// Maximale Seilsegment-Länge
    pub segment_length: f32,
    /// Startabstand der Glieder entlang +x
    pub joint_spacing: f32,
    /// Radius der Glied-Collider
    pub joint_radius: f32,
    /// Halbe Kantenlängen des Karten-Colliders
    pub card_half_extents: Vec3,
    /// Lokaler Kugelgelenk-Anker auf der Karte
    pub card_anchor: Vec3,
    /// Lineare Dämpfung
    pub linear_damping: f32,
    /// Winkel-Dämpfung
    pub angular_damping: f32,
    /// Dürfen Bodies einschlafen
    pub can_sleep: bool,
}

impl Default for RigLayout {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            segment_length: SEGMENT_LENGTH,
            joint_spacing: JOINT_SPACING,
            joint_radius: JOINT_RADIUS,
            card_half_extents: CARD_HALF_EXTENTS,
            card_anchor: CARD_JOINT_ANCHOR,
            linear_damping: SEGMENT_DAMPING,
            angular_damping: SEGMENT_DAMPING,
            can_sleep: true,
        }
    }
}

/// Handles aller registrierten Rig-Bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigHandles {
    /// Fixierter Aufhängepunkt
    pub fixed: BodyHandle,
    /// Erstes Glied (am Anker)
    pub j1: BodyHandle,
    /// Zweites Glied
    pub j2: BodyHandle,
    /// Drittes Glied (an der Karte)
    pub j3: BodyHandle,
    /// Karten-Body
    pub card: BodyHandle,
}

impl RigHandles {
    /// Alle Bodies in Aufweck-Reihenfolge: Karte, Glieder, Anker.
    pub fn all(&self) -> [BodyHandle; 5] {
        [self.card, self.j1, self.j2, self.j3, self.fixed]
    }

    /// Innere Glieder, deren Positionen geglättet werden (fern, nah).
    pub fn smoothed(&self) -> [BodyHandle; 2] {
        [self.j1, self.j2]
    }
}

impl RigLayout {
    /// Weltposition des Ankers.
    pub fn anchor_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, ANCHOR_HEIGHT, 0.0)
    }

    /// Startposition des `index`-ten Bodies entlang der Kette (0 = Anker, 4 = Karte).
    pub fn chain_position(&self, index: usize) -> Vec3 {
        self.anchor_position() + Vec3::new(self.joint_spacing * index as f32, 0.0, 0.0)
    }

    fn segment_desc(&self, position: Vec3) -> BodyDesc {
        BodyDesc::dynamic(position)
            .with_damping(self.linear_damping, self.angular_damping)
            .with_can_sleep(self.can_sleep)
    }

    /// Registriert Bodies und Joints im Simulator.
    pub fn build<S: RigidBodySimulator>(&self, sim: &mut S) -> Result<RigHandles, PhysicsError> {
        if !(self.segment_length.is_finite() && self.segment_length > 0.0) {
            return Err(PhysicsError::InvalidParameter {
                name: "segment_length",
                value: self.segment_length,
            });
        }

        let joint_collider = ColliderShape::Ball {
            radius: self.joint_radius,
        };

        let fixed = sim.add_body(BodyDesc {
            kind: BodyKind::Fixed,
            ..self.segment_desc(self.chain_position(0))
        });
        let j1 = sim.add_body(
            self.segment_desc(self.chain_position(1))
                .with_collider(joint_collider),
        );
        let j2 = sim.add_body(
            self.segment_desc(self.chain_position(2))
                .with_collider(joint_collider),
        );
        let j3 = sim.add_body(
            self.segment_desc(self.chain_position(3))
                .with_collider(joint_collider),
        );
        let card = sim.add_body(self.segment_desc(self.chain_position(4)).with_collider(
            ColliderShape::Cuboid {
                half_extents: self.card_half_extents,
            },
        ));

        sim.add_joint(JointDesc::rope(fixed, j1, self.segment_length))?;
        sim.add_joint(JointDesc::rope(j1, j2, self.segment_length))?;
        sim.add_joint(JointDesc::rope(j2, j3, self.segment_length))?;
        sim.add_joint(JointDesc::spherical(j3, card, Vec3::ZERO, self.card_anchor))?;

        log::debug!(
            "Lanyard-Rig registriert: Anker {:?}, Segmentlänge {}",
            self.anchor_position(),
            self.segment_length
        );

        Ok(RigHandles {
            fixed,
            j1,
            j2,
            j3,
            card,
        })
    }
}
