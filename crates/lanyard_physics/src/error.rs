//! Fehlertypen der Physik-Schicht.

use crate::body::BodyHandle;

/// Fehler bei der Registrierung von Bodies und Joints.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    /// Handle verweist auf keinen registrierten Body.
    #[error("unbekannter Body {0:?}")]
    UnknownBody(BodyHandle),
    /// Ein Joint verbindet einen Body mit sich selbst.
    #[error("Joint verbindet Body {0:?} mit sich selbst")]
    SelfJoint(BodyHandle),
    /// Parameter ist negativ oder nicht endlich.
    #[error("ungültiger Parameter `{name}`: {value}")]
    InvalidParameter {
        /// Name des Parameters
        name: &'static str,
        /// Übergebener Wert
        value: f32,
    },
}
