//! Zentrale Konfiguration des Lanyard-Widgets.
//!
//! `LanyardOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use glam::{Vec2, Vec3};
use lanyard_physics::WorldConfig;
use serde::{Deserialize, Serialize};

use crate::core::rig::{CARD_JOINT_ANCHOR, SEGMENT_DAMPING, SEGMENT_LENGTH};
use crate::core::smoothing::{DEFAULT_MAX_SPEED, DEFAULT_MIN_SPEED};
use crate::core::{CurveKind, LagFilter, PerspectiveCamera, RigLayout};

// ── Physik ──────────────────────────────────────────────────────────

/// Schwerkraft (Welteinheiten/s²).
pub const PHYSICS_GRAVITY: [f32; 3] = [0.0, -40.0, 0.0];
/// Fester Simulationsschritt in Sekunden.
pub const PHYSICS_TIME_STEP: f32 = 1.0 / 120.0;
/// Constraint-Iterationen pro Step.
pub const PHYSICS_SOLVER_ITERATIONS: usize = 8;

// ── Drag ────────────────────────────────────────────────────────────

/// Mindestabstand zwischen zwei Aufweck-Runden während eines Drags (Sekunden).
pub const WAKE_THROTTLE_SECS: f32 = 0.016;
/// Faktor der Gier-Dämpfung (Quaternion-y der Karte → Winkelgeschwindigkeit).
pub const YAW_DAMPING_FACTOR: f32 = 0.2;

// ── Karte ───────────────────────────────────────────────────────────

/// Breite der Kartenfläche.
pub const CARD_WIDTH: f32 = 3.5;
/// Höhe der Kartenfläche.
pub const CARD_HEIGHT: f32 = 4.5;
/// Eckenradius der Kartenfläche (16px in 3D-Einheiten).
pub const CARD_CORNER_RADIUS: f32 = 0.123;
/// Textur der Vorderseite.
pub const CARD_FRONT_TEXTURE: &str = "/lanyard/bg_3.png";
/// Textur der Rückseite.
pub const CARD_BACK_TEXTURE: &str = "/lanyard/bg.jpeg";

// ── Band ────────────────────────────────────────────────────────────

/// Textur des Bands.
pub const BAND_TEXTURE: &str = "/band.jpeg";
/// Linienbreite des Bands.
pub const BAND_LINE_WIDTH: f32 = 1.0;
/// Textur-Wiederholung entlang/quer zum Band.
pub const BAND_TEXTURE_REPEAT: [f32; 2] = [-3.0, 1.0];

/// Ungültige Optionswerte.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionsError {
    /// Wert muss positiv und endlich sein.
    #[error("`{field}` muss positiv sein, ist {value}")]
    NotPositive {
        /// Feldname
        field: &'static str,
        /// Aktueller Wert
        value: f32,
    },
    /// Geschwindigkeitsgrenzen vertauscht.
    #[error("lerp_min_speed ({min}) größer als lerp_max_speed ({max})")]
    SpeedRange {
        /// Minimale Geschwindigkeit
        min: f32,
        /// Maximale Geschwindigkeit
        max: f32,
    },
    /// Eckenradius größer als die halbe Kartenkante.
    #[error("Eckenradius {radius} passt nicht in Karte {width}x{height}")]
    CornerRadius {
        /// Radius
        radius: f32,
        /// Breite
        width: f32,
        /// Höhe
        height: f32,
    },
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `lanyard.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanyardOptions {
    // ── Physik ──────────────────────────────────────────────────
    /// Schwerkraft
    pub gravity: [f32; 3],
    /// Fester Simulationsschritt
    pub time_step: f32,
    /// Constraint-Iterationen
    pub solver_iterations: usize,

    // ── Rig ─────────────────────────────────────────────────────
    /// Maximale Seilsegment-Länge
    pub segment_length: f32,
    /// Lokaler Kugelgelenk-Anker auf der Karte
    pub card_joint_anchor: [f32; 3],
    /// Lineare und Winkel-Dämpfung der Rig-Bodies
    pub segment_damping: f32,

    // ── Glättung ────────────────────────────────────────────────
    /// Minimale Nachlauf-Geschwindigkeit
    pub lerp_min_speed: f32,
    /// Maximale Nachlauf-Geschwindigkeit
    pub lerp_max_speed: f32,
    /// Parametrisierung der Seilkurve
    #[serde(default)]
    pub curve_kind: CurveKind,

    // ── Drag ────────────────────────────────────────────────────
    /// Aufweck-Drosselung während des Drags (Sekunden)
    #[serde(default = "default_wake_throttle_secs")]
    pub wake_throttle_secs: f32,
    /// Faktor der Gier-Dämpfung
    #[serde(default = "default_yaw_damping_factor")]
    pub yaw_damping_factor: f32,

    // ── Kamera ──────────────────────────────────────────────────
    /// Kameraposition
    pub camera_position: [f32; 3],
    /// Vertikales Sichtfeld in Grad
    pub camera_fov_y: f32,

    // ── Karte ───────────────────────────────────────────────────
    /// Kartenbreite
    pub card_width: f32,
    /// Kartenhöhe
    pub card_height: f32,
    /// Eckenradius
    pub card_corner_radius: f32,
    /// Textur der Vorderseite
    pub card_front_texture: String,
    /// Textur der Rückseite
    pub card_back_texture: String,

    // ── Band ────────────────────────────────────────────────────
    /// Textur des Bands
    pub band_texture: String,
    /// Linienbreite des Bands
    pub band_line_width: f32,
    /// Textur-Wiederholung
    #[serde(default = "default_band_texture_repeat")]
    pub band_texture_repeat: [f32; 2],
}

impl Default for LanyardOptions {
    fn default() -> Self {
        Self {
            gravity: PHYSICS_GRAVITY,
            time_step: PHYSICS_TIME_STEP,
            solver_iterations: PHYSICS_SOLVER_ITERATIONS,

            segment_length: SEGMENT_LENGTH,
            card_joint_anchor: CARD_JOINT_ANCHOR.to_array(),
            segment_damping: SEGMENT_DAMPING,

            lerp_min_speed: DEFAULT_MIN_SPEED,
            lerp_max_speed: DEFAULT_MAX_SPEED,
            curve_kind: CurveKind::default(),

            wake_throttle_secs: WAKE_THROTTLE_SECS,
            yaw_damping_factor: YAW_DAMPING_FACTOR,

            camera_position: PerspectiveCamera::DEFAULT_POSITION.to_array(),
            camera_fov_y: PerspectiveCamera::DEFAULT_FOV_Y,

            card_width: CARD_WIDTH,
            card_height: CARD_HEIGHT,
            card_corner_radius: CARD_CORNER_RADIUS,
            card_front_texture: CARD_FRONT_TEXTURE.to_string(),
            card_back_texture: CARD_BACK_TEXTURE.to_string(),

            band_texture: BAND_TEXTURE.to_string(),
            band_line_width: BAND_LINE_WIDTH,
            band_texture_repeat: BAND_TEXTURE_REPEAT,
        }
    }
}

/// Serde-Default für `wake_throttle_secs` (Abwärtskompatibilität).
fn default_wake_throttle_secs() -> f32 {
    WAKE_THROTTLE_SECS
}

/// Serde-Default für `yaw_damping_factor`.
fn default_yaw_damping_factor() -> f32 {
    YAW_DAMPING_FACTOR
}

/// Serde-Default für `band_texture_repeat`.
fn default_band_texture_repeat() -> [f32; 2] {
    BAND_TEXTURE_REPEAT
}

impl LanyardOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => match opts.validate() {
                    Ok(()) => {
                        log::info!("Optionen geladen aus: {}", path.display());
                        opts
                    }
                    Err(e) => {
                        log::warn!("Optionen ungültig, verwende Standardwerte: {}", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("lanyard-demo"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("lanyard.toml")
    }

    /// Prüft alle Werte auf Plausibilität.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let positive = [
            ("time_step", self.time_step),
            ("segment_length", self.segment_length),
            ("lerp_max_speed", self.lerp_max_speed),
            ("wake_throttle_secs", self.wake_throttle_secs),
            ("camera_fov_y", self.camera_fov_y),
            ("card_width", self.card_width),
            ("card_height", self.card_height),
            ("band_line_width", self.band_line_width),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(OptionsError::NotPositive { field, value });
            }
        }
        if self.lerp_min_speed < 0.0 || self.lerp_min_speed > self.lerp_max_speed {
            return Err(OptionsError::SpeedRange {
                min: self.lerp_min_speed,
                max: self.lerp_max_speed,
            });
        }
        let half_min_side = 0.5 * self.card_width.min(self.card_height);
        if self.card_corner_radius < 0.0 || self.card_corner_radius > half_min_side {
            return Err(OptionsError::CornerRadius {
                radius: self.card_corner_radius,
                width: self.card_width,
                height: self.card_height,
            });
        }
        Ok(())
    }

    /// Simulator-Konfiguration.
    pub fn world_config(&self) -> WorldConfig {
        WorldConfig::new()
            .with_gravity(Vec3::from_array(self.gravity))
            .with_time_step(self.time_step)
            .with_iterations(self.solver_iterations)
    }

    /// Rig-Layout an `position`.
    pub fn rig_layout(&self, position: Vec3) -> RigLayout {
        RigLayout {
            position,
            segment_length: self.segment_length,
            card_anchor: Vec3::from_array(self.card_joint_anchor),
            linear_damping: self.segment_damping,
            angular_damping: self.segment_damping,
            ..RigLayout::default()
        }
    }

    /// Glättungs-Filter mit den konfigurierten Geschwindigkeiten.
    pub fn lag_filter(&self) -> LagFilter {
        LagFilter::new(self.lerp_min_speed, self.lerp_max_speed)
    }

    /// Kamera der Szene.
    pub fn camera(&self) -> PerspectiveCamera {
        PerspectiveCamera::new(Vec3::from_array(self.camera_position), self.camera_fov_y)
    }

    /// Kartengröße (Breite, Höhe).
    pub fn card_size(&self) -> Vec2 {
        Vec2::new(self.card_width, self.card_height)
    }
}
