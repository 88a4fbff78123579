//! Kartenflächen mit abgerundeten Ecken.
//!
//! Die Ecken werden per Signed-Distance-Test im Fragment-Shader
//! (`card.wgsl`) ausgeschnitten. Die CPU-Varianten in diesem Modul rechnen
//! exakt dieselbe Formel und dienen Hit-Tests und Tests.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2, Vec3};

use crate::core::Ray;
use crate::shared::{CardPose, LanyardOptions};

/// WGSL-Quelltext des Karten-Shaders.
pub const CARD_SHADER_WGSL: &str = include_str!("card.wgsl");

/// Halbe Breite des geglätteten Randbands (Welteinheiten).
pub const EDGE_SMOOTHING: f32 = 0.01;
/// Fragmente unterhalb dieser Deckkraft werden verworfen.
pub const DISCARD_ALPHA: f32 = 0.01;
/// Skalierung der Karten-Gruppe relativ zum Body.
pub const CARD_VISUAL_SCALE: f32 = 0.65;
/// Versatz der Karten-Gruppe relativ zum Body.
pub const CARD_VISUAL_OFFSET: Vec3 = Vec3::new(0.0, -0.4, -0.05);
/// Abstand der Flächen zur Kartenmitte (Vorderseite +z, Rückseite -z).
pub const CARD_FACE_OFFSET: f32 = 0.01;

/// Seite der Karte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    /// Vorderseite, zeigt Richtung +z
    Front,
    /// Rückseite, um π um die y-Achse gedreht
    Back,
}

impl CardSide {
    /// z-Versatz der Fläche in der Karten-Gruppe.
    pub fn z_offset(self) -> f32 {
        match self {
            Self::Front => CARD_FACE_OFFSET,
            Self::Back => -CARD_FACE_OFFSET,
        }
    }

    /// Rotation der Fläche in der Karten-Gruppe.
    pub fn rotation(self) -> Quat {
        match self {
            Self::Front => Quat::IDENTITY,
            Self::Back => Quat::from_rotation_y(std::f32::consts::PI),
        }
    }
}

/// Uniform-Block des Karten-Shaders (std140-kompatibel, 32 Bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CardUniforms {
    /// Flächengröße (Breite, Höhe)
    pub size: [f32; 2],
    /// Eckenradius
    pub border_radius: f32,
    /// Klarlack-Anteil
    pub clearcoat: f32,
    /// Rauheit des Klarlacks
    pub clearcoat_roughness: f32,
    /// Rauheit
    pub roughness: f32,
    /// Metallizität
    pub metalness: f32,
    _pad: f32,
}

/// Eine texturierte Kartenfläche.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSurface {
    /// Seite
    pub side: CardSide,
    /// Flächengröße (Breite, Höhe)
    pub size: Vec2,
    /// Eckenradius
    pub corner_radius: f32,
    /// Pfad der Textur
    pub texture: String,
}

impl CardSurface {
    /// Vorder- und Rückseite mit gemeinsamer Geometrie.
    pub fn pair(options: &LanyardOptions) -> [CardSurface; 2] {
        let make = |side, texture: &str| CardSurface {
            side,
            size: options.card_size(),
            corner_radius: options.card_corner_radius,
            texture: texture.to_string(),
        };
        [
            make(CardSide::Front, &options.card_front_texture),
            make(CardSide::Back, &options.card_back_texture),
        ]
    }

    /// Uniform-Werte für den Shader.
    pub fn uniforms(&self) -> CardUniforms {
        CardUniforms {
            size: self.size.to_array(),
            border_radius: self.corner_radius,
            clearcoat: 1.0,
            clearcoat_roughness: 0.15,
            roughness: 0.3,
            metalness: 0.5,
            _pad: 0.0,
        }
    }

    /// Deckkraft an einer uv-Koordinate.
    pub fn alpha_at(&self, uv: Vec2) -> f32 {
        corner_alpha(uv, self.size, self.corner_radius)
    }

    /// Model-Matrix der Fläche in Welt-Koordinaten.
    pub fn model_matrix(&self, pose: &CardPose) -> Mat4 {
        card_group_matrix(pose)
            * Mat4::from_rotation_translation(
                self.side.rotation(),
                Vec3::new(0.0, 0.0, self.side.z_offset()),
            )
    }
}

/// Signed Distance zu einem Rechteck mit abgerundeten Ecken.
///
/// Negativ innen, null auf dem Rand, positiv außen.
pub fn rounded_box_sdf(center_pos: Vec2, half_size: Vec2, radius: f32) -> f32 {
    (center_pos.abs() - half_size + Vec2::splat(radius))
        .max(Vec2::ZERO)
        .length()
        - radius
}

/// Hermite-Glättung wie GLSL/WGSL `smoothstep`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Deckkraft eines Fragments an `uv` (0..1) einer Fläche der Größe `size`.
pub fn corner_alpha(uv: Vec2, size: Vec2, radius: f32) -> f32 {
    let center_pos = (uv - Vec2::splat(0.5)) * size;
    let distance = rounded_box_sdf(center_pos, size * 0.5, radius);
    1.0 - smoothstep(-EDGE_SMOOTHING, EDGE_SMOOTHING, distance)
}

/// Wird das Fragment verworfen?
pub fn is_discarded(alpha: f32) -> bool {
    alpha < DISCARD_ALPHA
}

/// Transformation der Karten-Gruppe (Body-Pose · Versatz · Skalierung).
pub fn card_group_matrix(pose: &CardPose) -> Mat4 {
    Mat4::from_rotation_translation(pose.rotation, pose.translation)
        * Mat4::from_translation(CARD_VISUAL_OFFSET)
        * Mat4::from_scale(Vec3::splat(CARD_VISUAL_SCALE))
}

/// Treffer eines Pointer-Strahls auf der Karte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardHit {
    /// Trefferpunkt in Welt-Koordinaten
    pub point: Vec3,
    /// uv-Koordinate auf der Vorderseite
    pub uv: Vec2,
    /// Getroffene Seite
    pub side: CardSide,
    /// Strahlparameter des Treffers
    pub distance: f32,
}

/// Hit-Region der Karte: abgerundetes Rechteck in der Karten-Gruppe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardHitRegion {
    /// Flächengröße (Breite, Höhe)
    pub size: Vec2,
    /// Eckenradius
    pub corner_radius: f32,
}

impl CardHitRegion {
    /// Hit-Region passend zu den Optionen.
    pub fn from_options(options: &LanyardOptions) -> Self {
        Self {
            size: options.card_size(),
            corner_radius: options.card_corner_radius,
        }
    }

    /// Schneidet den Strahl mit der zugewandten Kartenfläche in der gegebenen Pose.
    pub fn intersect(&self, ray: &Ray, pose: &CardPose) -> Option<CardHit> {
        let to_local = card_group_matrix(pose).inverse();
        let origin = to_local.transform_point3(ray.origin);
        let direction = to_local.transform_vector3(ray.direction);
        if direction.z.abs() < f32::EPSILON {
            return None;
        }

        let side = if direction.z < 0.0 {
            CardSide::Front
        } else {
            CardSide::Back
        };

        // Affine Abbildung: Strahlparameter bleibt in Welt und Lokal gleich
        let t = (side.z_offset() - origin.z) / direction.z;
        if t < 0.0 {
            return None;
        }
        let local = (origin + direction * t).truncate();
        if rounded_box_sdf(local, self.size * 0.5, self.corner_radius) > 0.0 {
            return None;
        }

        Some(CardHit {
            point: ray.at(t),
            uv: local / self.size + Vec2::splat(0.5),
            side,
            distance: t,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn surface() -> CardSurface {
        CardSurface::pair(&LanyardOptions::default())[0].clone()
    }

    #[test]
    fn test_center_is_opaque() {
        assert_relative_eq!(surface().alpha_at(Vec2::splat(0.5)), 1.0);
    }

    #[test]
    fn test_corner_is_discarded() {
        let alpha = surface().alpha_at(Vec2::new(0.0, 0.0));
        assert!(is_discarded(alpha), "alpha = {alpha}");
    }

    #[test]
    fn test_edge_midpoint_is_half_transparent() {
        // Kantenmitte liegt exakt auf dem Rand (d = 0)
        assert_relative_eq!(surface().alpha_at(Vec2::new(1.0, 0.5)), 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_sdf_sign() {
        let half = Vec2::new(1.75, 2.25);
        assert!(rounded_box_sdf(Vec2::ZERO, half, 0.123) < 0.0);
        assert!(rounded_box_sdf(Vec2::new(2.0, 0.0), half, 0.123) > 0.0);
        assert_relative_eq!(
            rounded_box_sdf(Vec2::new(1.75, 0.0), half, 0.123),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_smoothstep_band() {
        assert_relative_eq!(smoothstep(-0.01, 0.01, -1.0), 0.0);
        assert_relative_eq!(smoothstep(-0.01, 0.01, 0.0), 0.5);
        assert_relative_eq!(smoothstep(-0.01, 0.01, 1.0), 1.0);
    }

    #[test]
    fn test_pair_shares_geometry_with_distinct_textures() {
        let [front, back] = CardSurface::pair(&LanyardOptions::default());
        assert_eq!(front.size, back.size);
        assert_relative_eq!(front.corner_radius, 0.123);
        assert_ne!(front.texture, back.texture);
        assert_eq!(front.side, CardSide::Front);
        assert_relative_eq!(back.side.z_offset(), -0.01);
    }

    #[test]
    fn test_uniforms_are_32_bytes() {
        assert_eq!(std::mem::size_of::<CardUniforms>(), 32);
        let uniforms = surface().uniforms();
        assert_eq!(bytemuck::bytes_of(&uniforms).len(), 32);
        assert_relative_eq!(uniforms.metalness, 0.5);
    }

    #[test]
    fn test_ray_hits_card_center_from_front() {
        let pose = CardPose {
            translation: Vec3::new(0.0, 0.0, 0.0),
            rotation: Quat::IDENTITY,
        };
        let center = pose.translation + CARD_VISUAL_OFFSET;
        let ray = Ray {
            origin: Vec3::new(center.x, center.y, 13.0),
            direction: Vec3::NEG_Z,
        };
        let hit = CardHitRegion::from_options(&LanyardOptions::default())
            .intersect(&ray, &pose)
            .expect("Strahl sollte die Karte treffen");
        assert_eq!(hit.side, CardSide::Front);
        let face_z = center.z + CARD_FACE_OFFSET * CARD_VISUAL_SCALE;
        assert_relative_eq!(hit.point.z, face_z, epsilon = 1e-5);
        assert_relative_eq!(hit.uv.x, 0.5, epsilon = 1e-4);
        assert_relative_eq!(hit.uv.y, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_ray_from_behind_hits_back_face() {
        let pose = CardPose::default();
        let center = pose.translation + CARD_VISUAL_OFFSET;
        let ray = Ray {
            origin: Vec3::new(center.x, center.y, -13.0),
            direction: Vec3::Z,
        };
        let hit = CardHitRegion::from_options(&LanyardOptions::default())
            .intersect(&ray, &pose)
            .expect("Strahl sollte die Rückseite treffen");
        assert_eq!(hit.side, CardSide::Back);
        let face_z = center.z - CARD_FACE_OFFSET * CARD_VISUAL_SCALE;
        assert_relative_eq!(hit.point.z, face_z, epsilon = 1e-5);
    }

    #[test]
    fn test_model_matrix_places_faces() {
        let pose = CardPose::default();
        let [front, back] = CardSurface::pair(&LanyardOptions::default());
        let group = card_group_matrix(&pose);

        let front_local = group.inverse() * front.model_matrix(&pose);
        let (_, rotation, translation) = front_local.to_scale_rotation_translation();
        assert_relative_eq!(translation.z, 0.01, epsilon = 1e-5);
        assert_relative_eq!(rotation.w.abs(), 1.0, epsilon = 1e-5);

        let back_local = group.inverse() * back.model_matrix(&pose);
        let (_, rotation, translation) = back_local.to_scale_rotation_translation();
        assert_relative_eq!(translation.z, -0.01, epsilon = 1e-5);
        // π um y: Normale zeigt nach -z
        let normal = rotation * Vec3::Z;
        assert_relative_eq!(normal.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(rotation.y.abs(), 1.0, epsilon = 1e-5);

        let world_back = back.model_matrix(&pose).transform_point3(Vec3::ZERO);
        let expected = pose.translation
            + CARD_VISUAL_OFFSET
            + Vec3::new(0.0, 0.0, -0.01 * CARD_VISUAL_SCALE);
        assert_relative_eq!(world_back.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_beside_card_misses() {
        let pose = CardPose::default();
        let ray = Ray {
            origin: Vec3::new(5.0, 0.0, 13.0),
            direction: Vec3::NEG_Z,
        };
        let region = CardHitRegion::from_options(&LanyardOptions::default());
        assert!(region.intersect(&ray, &pose).is_none());
    }

    #[test]
    fn test_shader_source_contains_sdf() {
        assert!(CARD_SHADER_WGSL.contains("fn rounded_box_sdf"));
        assert!(CARD_SHADER_WGSL.contains("smoothstep(-0.01, 0.01"));
    }
}
