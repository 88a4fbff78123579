//! Capability-Schnittstelle zwischen Rig und Physik-Engine.

use glam::{Quat, Vec3};

use crate::{BodyDesc, BodyHandle, BodyKind, JointDesc, PhysicsError};

/// Alles, was das Lanyard-Rig von einer Rigid-Body-Engine braucht.
///
/// Unbekannte Handles führen nie zu Panics: Abfragen liefern `None`,
/// Setter sind No-Ops. Der Frame-Loop überspringt dann das betroffene Teil.
pub trait RigidBodySimulator {
    /// Registriert einen Body.
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle;

    /// Registriert einen Joint zwischen zwei bereits registrierten Bodies.
    fn add_joint(&mut self, joint: JointDesc) -> Result<(), PhysicsError>;

    /// Simuliert `delta` Sekunden Frame-Zeit.
    fn step(&mut self, delta: f32);

    /// Aktuelle Position.
    fn translation(&self, body: BodyHandle) -> Option<Vec3>;

    /// Aktuelle Rotation.
    fn rotation(&self, body: BodyHandle) -> Option<Quat>;

    /// Pose für die Darstellung, zwischen den letzten beiden Fixed-Steps
    /// interpoliert. Engines ohne Interpolation liefern die aktuelle Pose.
    fn interpolated_pose(&self, body: BodyHandle) -> Option<(Vec3, Quat)> {
        Some((self.translation(body)?, self.rotation(body)?))
    }

    /// Aktuelle lineare Geschwindigkeit.
    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec3>;

    /// Aktuelle Winkelgeschwindigkeit.
    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3>;

    /// Aktueller Simulationsmodus.
    fn body_kind(&self, body: BodyHandle) -> Option<BodyKind>;

    /// Wechselt den Simulationsmodus.
    fn set_body_kind(&mut self, body: BodyHandle, kind: BodyKind);

    /// Zielposition eines kinematischen Bodies für den nächsten Step.
    fn set_next_kinematic_translation(&mut self, body: BodyHandle, target: Vec3);

    /// Überschreibt die Winkelgeschwindigkeit, optional mit Aufwecken.
    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: Vec3, wake: bool);

    /// Weckt einen schlafenden Body.
    fn wake_up(&mut self, body: BodyHandle);

    /// Schläft der Body gerade?
    fn is_sleeping(&self, body: BodyHandle) -> bool;
}
