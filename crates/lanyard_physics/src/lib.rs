//! Rigid-Body-Simulation für das Lanyard-Rig.
//!
//! Die Crate liefert zwei Dinge:
//!
//! - **`RigidBodySimulator`**: die Capability-Schnittstelle, über die das Rig
//!   Bodies und Joints registriert, Posen abfragt und kinematische Ziele setzt.
//! - **`ChainWorld`**: eine positionsbasierte Referenz-Implementierung
//!   (Verlet-artige Integration, Rope- und Spherical-Joints, Sleeping),
//!   damit der Frame-Loop ohne externe Engine lauffähig ist.

pub mod body;
pub mod config;
pub mod error;
pub mod joint;
pub mod observer;
pub mod simulator;
pub mod world;

pub use body::{BodyDesc, BodyHandle, BodyKind, ColliderShape};
pub use config::WorldConfig;
pub use error::PhysicsError;
pub use joint::JointDesc;
pub use observer::{NoOpStepObserver, StepObserver};
pub use simulator::RigidBodySimulator;
pub use world::ChainWorld;
