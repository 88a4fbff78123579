//! Positionsbasierte Referenz-Welt für das Lanyard-Rig.
//!
//! Ablauf pro Fixed-Step:
//! 1. Kinematische Bodies übernehmen ihr Ziel, dynamische werden integriert
//!    (Schwerkraft, Dämpfung, Rotation).
//! 2. Joints werden iterativ aufgelöst (Gauss-Seidel).
//! 3. Geschwindigkeiten werden aus der Positionsänderung abgeleitet.
//! 4. Ruhende Bodies schlafen ein.

use glam::{Quat, Vec3};

use crate::body::RigidBody;
use crate::{
    BodyDesc, BodyHandle, BodyKind, JointDesc, NoOpStepObserver, PhysicsError,
    RigidBodySimulator, StepObserver, WorldConfig,
};

/// Referenz-Implementierung von [`RigidBodySimulator`].
pub struct ChainWorld {
    config: WorldConfig,
    bodies: Vec<RigidBody>,
    joints: Vec<JointDesc>,
    accumulator: f32,
    step_count: u64,
}

impl ChainWorld {
    /// Erstellt eine leere Welt.
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            joints: Vec::new(),
            accumulator: 0.0,
            step_count: 0,
        }
    }

    /// Aktive Konfiguration.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Anzahl registrierter Bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Anzahl registrierter Joints.
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Anzahl bisher ausgeführter Fixed-Steps.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Anteil des Rest-Akkumulators am Fixed-Step (0..1) für Render-Interpolation.
    pub fn interpolation_alpha(&self) -> f32 {
        (self.accumulator / self.config.time_step).clamp(0.0, 1.0)
    }

    /// Wie [`RigidBodySimulator::step`], mit Observer-Callbacks.
    pub fn step_observed<O: StepObserver>(&mut self, delta: f32, observer: &mut O) {
        if !(delta.is_finite() && delta > 0.0) {
            return;
        }
        let dt = self.config.time_step;
        self.accumulator += delta;

        let mut steps = 0;
        while self.accumulator >= dt && steps < self.config.max_sub_steps {
            self.fixed_step(dt, observer);
            self.accumulator -= dt;
            steps += 1;
        }
        if steps == self.config.max_sub_steps && self.accumulator >= dt {
            log::debug!(
                "Physik hinkt hinterher, verwerfe {:.4}s Akkumulator",
                self.accumulator - dt
            );
            self.accumulator = self.accumulator.min(dt);
        }
    }

    fn fixed_step<O: StepObserver>(&mut self, dt: f32, observer: &mut O) {
        let gravity = self.config.gravity;
        for body in &mut self.bodies {
            body.prev_position = body.position;
            body.prev_rotation = body.rotation;
            match body.kind {
                BodyKind::Fixed => {}
                BodyKind::KinematicPosition => {
                    if let Some(target) = body.kinematic_target.take() {
                        body.position = target;
                    }
                }
                BodyKind::Dynamic if body.sleeping => {}
                BodyKind::Dynamic => {
                    body.linear_velocity += gravity * dt;
                    body.linear_velocity *= 1.0 / (1.0 + dt * body.linear_damping);
                    body.angular_velocity *= 1.0 / (1.0 + dt * body.angular_damping);
                    body.position += body.linear_velocity * dt;
                    body.rotation = integrate_rotation(body.rotation, body.angular_velocity, dt);
                }
            }
        }
        observer.on_integrate();

        for iteration in 0..self.config.iterations {
            for joint in &self.joints {
                joint.solve(&mut self.bodies);
            }
            observer.on_constraint_iteration(iteration);
        }

        for (index, body) in self.bodies.iter_mut().enumerate() {
            match body.kind {
                BodyKind::Fixed => continue,
                BodyKind::KinematicPosition => {
                    body.linear_velocity = (body.position - body.prev_position) / dt;
                    continue;
                }
                BodyKind::Dynamic if body.sleeping => continue,
                BodyKind::Dynamic => {
                    body.linear_velocity = (body.position - body.prev_position) / dt;
                    body.angular_velocity =
                        angular_velocity_between(body.prev_rotation, body.rotation, dt);
                }
            }

            if !body.can_sleep {
                continue;
            }
            let resting = body.linear_velocity.length() < self.config.sleep_linear_threshold
                && body.angular_velocity.length() < self.config.sleep_angular_threshold;
            if resting {
                body.sleep_timer += dt;
                if body.sleep_timer >= self.config.time_until_sleep {
                    body.sleeping = true;
                    body.linear_velocity = Vec3::ZERO;
                    body.angular_velocity = Vec3::ZERO;
                    observer.on_body_sleep(BodyHandle(index as u32));
                }
            } else {
                body.sleep_timer = 0.0;
            }
        }

        self.step_count += 1;
        observer.on_step_complete();
    }

    fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.index())
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.index())
    }
}

impl Default for ChainWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl RigidBodySimulator for ChainWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(RigidBody::from_desc(&desc));
        log::trace!("Body {:?} registriert ({:?})", handle, desc.kind);
        handle
    }

    fn add_joint(&mut self, joint: JointDesc) -> Result<(), PhysicsError> {
        let (a, b) = joint.bodies();
        for handle in [a, b] {
            if self.body(handle).is_none() {
                return Err(PhysicsError::UnknownBody(handle));
            }
        }
        if a == b {
            return Err(PhysicsError::SelfJoint(a));
        }
        if let JointDesc::Rope { max_length, .. } = joint {
            if !(max_length.is_finite() && max_length >= 0.0) {
                return Err(PhysicsError::InvalidParameter {
                    name: "max_length",
                    value: max_length,
                });
            }
        }
        self.joints.push(joint);
        Ok(())
    }

    fn step(&mut self, delta: f32) {
        self.step_observed(delta, &mut NoOpStepObserver);
    }

    fn translation(&self, body: BodyHandle) -> Option<Vec3> {
        self.body(body).map(|b| b.position)
    }

    fn rotation(&self, body: BodyHandle) -> Option<Quat> {
        self.body(body).map(|b| b.rotation)
    }

    fn interpolated_pose(&self, body: BodyHandle) -> Option<(Vec3, Quat)> {
        let b = self.body(body)?;
        let alpha = self.interpolation_alpha();
        Some((
            b.prev_position.lerp(b.position, alpha),
            b.prev_rotation.slerp(b.rotation, alpha),
        ))
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
        let Some(b) = self.body_mut(body) else {
            return;
        };
        if b.kind == kind {
            return;
        }
        log::debug!("Body {:?}: {:?} -> {:?}", body, b.kind, kind);
        if kind == BodyKind::KinematicPosition {
            b.linear_velocity = Vec3::ZERO;
            b.angular_velocity = Vec3::ZERO;
        }
        b.kinematic_target = None;
        b.kind = kind;
        b.wake();
    }

    fn set_next_kinematic_translation(&mut self, body: BodyHandle, target: Vec3) {
        let Some(b) = self.body_mut(body) else {
            return;
        };
        if b.kind == BodyKind::KinematicPosition {
            b.kinematic_target = Some(target);
            b.wake();
        }
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: Vec3, wake: bool) {
        if let Some(b) = self.body_mut(body) {
            b.angular_velocity = velocity;
            if wake {
                b.wake();
            }
        }
    }

    fn wake_up(&mut self, body: BodyHandle) {
        if let Some(b) = self.body_mut(body) {
            b.wake();
        }
    }

    fn is_sleeping(&self, body: BodyHandle) -> bool {
        self.body(body).is_some_and(|b| b.sleeping)
    }
}

fn integrate_rotation(rotation: Quat, angular_velocity: Vec3, dt: f32) -> Quat {
    let w = angular_velocity;
    let spin = Quat::from_xyzw(w.x, w.y, w.z, 0.0) * rotation;
    (rotation + spin * (0.5 * dt)).normalize()
}

fn angular_velocity_between(previous: Quat, current: Quat, dt: f32) -> Vec3 {
    let delta = current * previous.inverse();
    let omega = Vec3::new(delta.x, delta.y, delta.z) * (2.0 / dt);
    if delta.w >= 0.0 { omega } else { -omega }
}
