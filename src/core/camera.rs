//! Perspektivische Kamera für Pointer-Unprojektion.

use glam::{Mat4, Vec2, Vec3};

/// Strahl in Welt-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ursprung (Kameraposition)
    pub origin: Vec3,
    /// Normierte Richtung
    pub direction: Vec3,
}

impl Ray {
    /// Punkt im Abstand `t` entlang des Strahls.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Perspektivische Kamera, die auf einen Zielpunkt schaut.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Position der Kamera in Welt-Koordinaten
    pub position: Vec3,
    /// Blickziel
    pub target: Vec3,
    /// Vertikales Sichtfeld in Grad
    pub fov_y_degrees: f32,
    /// Seitenverhältnis Breite/Höhe
    pub aspect: f32,
    /// Near-Plane
    pub near: f32,
    /// Far-Plane
    pub far: f32,
}

impl PerspectiveCamera {
    /// Standard-Kameraposition der Karten-Szene.
    pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 13.0);
    /// Standard-Sichtfeld in Grad.
    pub const DEFAULT_FOV_Y: f32 = 25.0;
    /// Standard-Near-Plane.
    pub const DEFAULT_NEAR: f32 = 0.1;
    /// Standard-Far-Plane.
    pub const DEFAULT_FAR: f32 = 2000.0;

    /// Erstellt eine Kamera an `position` mit Blick auf den Ursprung.
    pub fn new(position: Vec3, fov_y_degrees: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            fov_y_degrees,
            aspect: 1.0,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
        }
    }

    /// Passt das Seitenverhältnis an die Viewport-Größe an.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// View-Matrix (Welt → Kamera).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Projektions-Matrix mit GL-Tiefenbereich (NDC z ∈ [-1, 1]).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    /// Kombinierte View-Projection-Matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Rechnet NDC-Koordinaten (inkl. Tiefe) in Welt-Koordinaten zurück.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        self.view_projection().inverse().project_point3(ndc)
    }

    /// Projiziert einen Weltpunkt in NDC-Koordinaten.
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection().project_point3(world)
    }

    /// Strahl von der Kamera durch den Pointer.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let through = self.unproject(ndc.extend(0.5));
        Ray {
            origin: self.position,
            direction: (through - self.position).normalize_or_zero(),
        }
    }

    /// Pointer-Position auf der Drag-Ebene der Karte.
    ///
    /// Der Punkt bei NDC-Tiefe 0.5 wird um den Abstand der Kamera zum
    /// Ursprung entlang des Pointer-Strahls verlängert.
    pub fn pointer_to_drag_plane(&self, ndc: Vec2) -> Vec3 {
        let near_point = self.unproject(ndc.extend(0.5));
        let direction = (near_point - self.position).normalize_or_zero();
        near_point + direction * self.position.length()
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POSITION, Self::DEFAULT_FOV_Y)
    }
}
