//! Aufzeichnender Fake-Simulator für Controller-Tests.

#![allow(dead_code)]

use std::collections::HashSet;

use glam::{Quat, Vec3};
use lanyard_physics::{
    BodyDesc, BodyHandle, BodyKind, JointDesc, PhysicsError, RigidBodySimulator,
};

#[derive(Debug, Clone)]
pub struct FakeBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub kind: BodyKind,
    pub target: Option<Vec3>,
}

/// Simulator ohne Dynamik: kinematische Ziele werden beim Step übernommen,
/// alles andere bleibt stehen. Alle Aufrufe werden gezählt.
#[derive(Debug, Default)]
pub struct FakeSimulator {
    pub bodies: Vec<FakeBody>,
    pub joints: Vec<JointDesc>,
    pub kind_switches: Vec<(BodyHandle, BodyKind)>,
    pub wakes: Vec<BodyHandle>,
    pub steps: Vec<f32>,
    pub angular_writes: Vec<(BodyHandle, Vec3, bool)>,
    pub missing: HashSet<BodyHandle>,
}

impl FakeSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lässt einen Body für alle folgenden Abfragen verschwinden.
    pub fn remove(&mut self, body: BodyHandle) {
        self.missing.insert(body);
    }

    pub fn body_mut(&mut self, body: BodyHandle) -> Option<&mut FakeBody> {
        if self.missing.contains(&body) {
            return None;
        }
        self.bodies.get_mut(body.0 as usize)
    }

    fn body(&self, body: BodyHandle) -> Option<&FakeBody> {
        if self.missing.contains(&body) {
            return None;
        }
        self.bodies.get(body.0 as usize)
    }
}

impl RigidBodySimulator for FakeSimulator {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        self.bodies.push(FakeBody {
            position: desc.position,
            rotation: desc.rotation,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            kind: desc.kind,
            target: None,
        });
        BodyHandle(self.bodies.len() as u32 - 1)
    }

    fn add_joint(&mut self, joint: JointDesc) -> Result<(), PhysicsError> {
        self.joints.push(joint);
        Ok(())
    }

    fn step(&mut self, delta: f32) {
        self.steps.push(delta);
        for body in &mut self.bodies {
            if let Some(target) = body.target.take() {
                body.position = target;
            }
        }
    }

    fn translation(&self, body: BodyHandle) -> Option<Vec3> {
        self.body(body).map(|b| b.position)
    }

    fn rotation(&self, body: BodyHandle) -> Option<Quat> {
        self.body(body).map(|b| b.rotation)
    }

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.body(body).map(|b| b.linear_velocity)
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.body(body).map(|b| b.angular_velocity)
    }

    fn body_kind(&self, body: BodyHandle) -> Option<BodyKind> {
        self.body(body).map(|b| b.kind)
    }

    fn set_body_kind(&mut self, body: BodyHandle, kind: BodyKind) {
        self.kind_switches.push((body, kind));
        if let Some(b) = self.body_mut(body) {
            b.kind = kind;
        }
    }

    fn set_next_kinematic_translation(&mut self, body: BodyHandle, target: Vec3) {
        if let Some(b) = self.body_mut(body) {
            if b.kind == BodyKind::KinematicPosition {
                b.target = Some(target);
            }
        }
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: Vec3, wake: bool) {
        self.angular_writes.push((body, velocity, wake));
        if let Some(b) = self.body_mut(body) {
            b.angular_velocity = velocity;
        }
    }

    fn wake_up(&mut self, body: BodyHandle) {
        self.wakes.push(body);
    }

    fn is_sleeping(&self, _body: BodyHandle) -> bool {
        false
    }
}
