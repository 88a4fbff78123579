//! Konfiguration der Simulationswelt.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::PhysicsError;

/// Schwerkraft des Lanyard-Rigs (bewusst stärker als Erdschwere).
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -40.0, 0.0);
/// Fester Zeitschritt in Sekunden.
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 120.0;

/// Parameter der `ChainWorld`.
///
/// ```
/// use lanyard_physics::WorldConfig;
/// use glam::Vec3;
///
/// let config = WorldConfig::new()
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_iterations(8);
/// assert_eq!(config.iterations, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Schwerkraft-Beschleunigung
    pub gravity: Vec3,
    /// Fester Simulationsschritt in Sekunden
    pub time_step: f32,
    /// Constraint-Iterationen pro Step
    pub iterations: usize,
    /// Maximale Fixed-Steps pro `step()`-Aufruf (verhindert Spiral of Death)
    pub max_sub_steps: usize,
    /// Lineare Geschwindigkeit, unter der ein Body als ruhend gilt
    pub sleep_linear_threshold: f32,
    /// Winkelgeschwindigkeit, unter der ein Body als ruhend gilt
    pub sleep_angular_threshold: f32,
    /// Ruhezeit in Sekunden bis zum Einschlafen
    pub time_until_sleep: f32,
}

impl WorldConfig {
    /// Standardwerte des Lanyard-Rigs.
    pub fn new() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            time_step: DEFAULT_TIME_STEP,
            iterations: 8,
            max_sub_steps: 8,
            sleep_linear_threshold: 0.4,
            sleep_angular_threshold: 0.5,
            time_until_sleep: 2.0,
        }
    }

    /// Setzt die Schwerkraft.
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Setzt den festen Zeitschritt.
    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    /// Setzt die Anzahl der Constraint-Iterationen (mindestens 1).
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Setzt die maximale Anzahl Fixed-Steps pro Frame (mindestens 1).
    pub fn with_max_sub_steps(mut self, max_sub_steps: usize) -> Self {
        self.max_sub_steps = max_sub_steps.max(1);
        self
    }

    /// Prüft die Werte auf Plausibilität.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(PhysicsError::InvalidParameter {
                name: "time_step",
                value: self.time_step,
            });
        }
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidParameter {
                name: "gravity",
                value: self.gravity.length(),
            });
        }
        if self.time_until_sleep < 0.0 {
            return Err(PhysicsError::InvalidParameter {
                name: "time_until_sleep",
                value: self.time_until_sleep,
            });
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_time_step_is_rejected() {
        let config = WorldConfig::new().with_time_step(0.0);
        assert!(matches!(
            config.validate(),
            Err(PhysicsError::InvalidParameter {
                name: "time_step",
                ..
            })
        ));
    }

    #[test]
    fn test_builder_clamps_counts() {
        let config = WorldConfig::new().with_iterations(0).with_max_sub_steps(0);
        assert_eq!(config.iterations, 1);
        assert_eq!(config.max_sub_steps, 1);
    }
}
