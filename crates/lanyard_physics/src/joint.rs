//! Joint-Beschreibungen und positionsbasierte Auflösung.
//!
//! Beide Joint-Arten werden als positionsbasierte Constraints an den
//! Welt-Ankerpunkten gelöst. Der Hebelarm zum Anker fließt in die
//! generalisierte inverse Masse und in die Rotationskorrektur ein.

use glam::{Quat, Vec3};

use crate::body::{BodyHandle, RigidBody};

/// Unterhalb dieses Fehlers wird keine Korrektur angewendet.
const CONSTRAINT_EPSILON: f32 = 1e-6;
/// Korrekturen ab dieser Größe wecken schlafende Bodies.
const WAKE_EPSILON: f32 = 1e-3;

/// Beschreibung eines Joints zwischen zwei Bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointDesc {
    /// Maximalabstand zwischen zwei Ankern (Seil: zieht nur, drückt nie).
    Rope {
        body_a: BodyHandle,
        body_b: BodyHandle,
        anchor_a: Vec3,
        anchor_b: Vec3,
        max_length: f32,
    },
    /// Beide Anker fallen zusammen, Rotation bleibt frei.
    Spherical {
        body_a: BodyHandle,
        body_b: BodyHandle,
        anchor_a: Vec3,
        anchor_b: Vec3,
    },
}

impl JointDesc {
    /// Seil mit Ankern im Body-Ursprung.
    pub fn rope(body_a: BodyHandle, body_b: BodyHandle, max_length: f32) -> Self {
        Self::Rope {
            body_a,
            body_b,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
            max_length,
        }
    }

    /// Kugelgelenk mit lokalen Ankern.
    pub fn spherical(
        body_a: BodyHandle,
        body_b: BodyHandle,
        anchor_a: Vec3,
        anchor_b: Vec3,
    ) -> Self {
        Self::Spherical {
            body_a,
            body_b,
            anchor_a,
            anchor_b,
        }
    }

    /// Beide beteiligten Bodies.
    pub fn bodies(&self) -> (BodyHandle, BodyHandle) {
        match *self {
            Self::Rope { body_a, body_b, .. } | Self::Spherical { body_a, body_b, .. } => {
                (body_a, body_b)
            }
        }
    }

    fn anchors(&self) -> (Vec3, Vec3) {
        match *self {
            Self::Rope {
                anchor_a, anchor_b, ..
            }
            | Self::Spherical {
                anchor_a, anchor_b, ..
            } => (anchor_a, anchor_b),
        }
    }

    /// Wendet eine Korrektur auf die beiden Bodies an.
    ///
    /// Gibt den verbleibenden Fehler vor der Korrektur zurück.
    pub(crate) fn solve(&self, bodies: &mut [RigidBody]) -> f32 {
        let (handle_a, handle_b) = self.bodies();
        let (ia, ib) = (handle_a.index(), handle_b.index());
        if ia == ib || ia >= bodies.len() || ib >= bodies.len() {
            return 0.0;
        }

        let (local_a, local_b) = self.anchors();
        let r_a = bodies[ia].world_offset(local_a);
        let r_b = bodies[ib].world_offset(local_b);
        let delta = (bodies[ib].position + r_b) - (bodies[ia].position + r_a);
        let distance = delta.length();

        let error = match *self {
            Self::Rope { max_length, .. } => distance - max_length,
            Self::Spherical { .. } => distance,
        };
        if error <= CONSTRAINT_EPSILON || distance <= CONSTRAINT_EPSILON {
            return 0.0;
        }
        let normal = delta / distance;

        // Schlafende Partner wachen auf, sobald ein aktiver Body spürbar zieht.
        if error > WAKE_EPSILON && (bodies[ia].is_active() || bodies[ib].is_active()) {
            bodies[ia].wake();
            bodies[ib].wake();
        }

        let w_a = generalized_inverse_mass(&bodies[ia], r_a, normal);
        let w_b = generalized_inverse_mass(&bodies[ib], r_b, normal);
        let w_total = w_a + w_b;
        if w_total <= f32::EPSILON {
            return error;
        }

        let impulse = normal * (error / w_total);
        apply_correction(&mut bodies[ia], r_a, impulse);
        apply_correction(&mut bodies[ib], r_b, -impulse);
        error
    }
}

fn generalized_inverse_mass(body: &RigidBody, lever: Vec3, normal: Vec3) -> f32 {
    if body.sleeping {
        return 0.0;
    }
    let arm = lever.cross(normal);
    body.inv_mass() + body.inv_inertia() * arm.length_squared()
}

fn apply_correction(body: &mut RigidBody, lever: Vec3, impulse: Vec3) {
    if body.sleeping {
        return;
    }
    let inv_mass = body.inv_mass();
    if inv_mass > 0.0 {
        body.position += impulse * inv_mass;
    }
    let inv_inertia = body.inv_inertia();
    if inv_inertia > 0.0 {
        let omega = lever.cross(impulse) * inv_inertia;
        let spin = Quat::from_xyzw(omega.x, omega.y, omega.z, 0.0) * body.rotation;
        body.rotation = (body.rotation + spin * 0.5).normalize();
    }
}
