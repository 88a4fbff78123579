//! Darstellung von Karte und Band.
//!
//! Die Geometrie- und Shader-Daten sind GPU-unabhängig. Ein Host bindet sie
//! über [`SceneRenderer`] an seine Grafik-API an.

mod card_surface;
mod headless;
mod ribbon;

pub use card_surface::{
    CARD_FACE_OFFSET, CARD_SHADER_WGSL, CARD_VISUAL_OFFSET, CARD_VISUAL_SCALE, CardHit,
    CardHitRegion, CardSide, CardSurface, CardUniforms, DISCARD_ALPHA, EDGE_SMOOTHING,
    card_group_matrix, corner_alpha, is_discarded, rounded_box_sdf, smoothstep,
};
pub use headless::{HeadlessRenderer, HostCall};
pub use ribbon::{RibbonGeometry, RibbonUniforms, RibbonVertex};

use crate::core::PerspectiveCamera;
use crate::shared::{CursorIcon, LanyardScene, PointerId};

/// Host-Schnittstelle: Kamera, Cursor, Pointer-Capture und Frame-Übergabe.
pub trait SceneRenderer {
    /// Aktive Kamera der Szene.
    fn camera(&self) -> &PerspectiveCamera;

    /// Setzt den Mauszeiger des Hosts.
    fn set_cursor(&mut self, icon: CursorIcon);

    /// Fängt den Pointer ein, sodass Move/Up auch außerhalb der Karte ankommen.
    fn set_pointer_capture(&mut self, pointer: PointerId);

    /// Gibt einen eingefangenen Pointer frei.
    fn release_pointer_capture(&mut self, pointer: PointerId);

    /// Übergibt die Szene eines Frames.
    fn submit(&mut self, scene: &LanyardScene);
}

impl<R: SceneRenderer + ?Sized> SceneRenderer for &mut R {
    fn camera(&self) -> &PerspectiveCamera {
        (**self).camera()
    }

    fn set_cursor(&mut self, icon: CursorIcon) {
        (**self).set_cursor(icon);
    }

    fn set_pointer_capture(&mut self, pointer: PointerId) {
        (**self).set_pointer_capture(pointer);
    }

    fn release_pointer_capture(&mut self, pointer: PointerId) {
        (**self).release_pointer_capture(pointer);
    }

    fn submit(&mut self, scene: &LanyardScene) {
        (**self).submit(scene);
    }
}
