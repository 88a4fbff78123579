//! Lanyard-Demo.
//!
//! Lässt das Rig ohne GPU laufen: Karte einpendeln lassen, per skriptetem
//! Pointer greifen, im Kreis ziehen, loslassen.

use anyhow::Context;
use glam::Vec2;
use lanyard_card::render::CARD_VISUAL_OFFSET;
use lanyard_card::{
    FrameState, HeadlessRenderer, LanyardController, LanyardOptions, PointerEvent, PointerId,
    SceneRenderer,
};
use lanyard_physics::{ChainWorld, RigidBodySimulator};

/// Frame-Dauer der Demo (60 Hz).
const FRAME_DELTA: f32 = 1.0 / 60.0;
/// Frames pro Demo-Phase.
const PHASE_FRAMES: u32 = 120;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Lanyard-Demo v{} startet...", env!("CARGO_PKG_VERSION"));

    let config_path = LanyardOptions::config_path();
    let options = LanyardOptions::load_from_file(&config_path);
    let world_config = options.world_config();
    world_config
        .validate()
        .context("Physik-Konfiguration ungültig")?;

    let mut controller = LanyardController::new(
        &options,
        ChainWorld::new(world_config),
        HeadlessRenderer::new(&options),
    )
    .context("Rig konnte nicht aufgebaut werden")?;

    let mut clock = DemoClock::default();

    // Einpendeln
    for _ in 0..PHASE_FRAMES {
        controller.frame(clock.tick(Vec2::ZERO));
    }

    // Greifen: Kartenmitte auf den Bildschirm projizieren und dort treffen
    let card = controller.rig().card;
    let card_center = controller
        .simulator()
        .translation(card)
        .context("Karten-Body fehlt")?
        + CARD_VISUAL_OFFSET;
    let grab_ndc = controller.host().camera().project(card_center).truncate();
    let Some(hit) = controller.host().hit_test(grab_ndc) else {
        log::warn!("Karte bei {:?} nicht getroffen, Demo endet", grab_ndc);
        return Ok(());
    };

    let pointer_id = PointerId(1);
    controller.handle_pointer(PointerEvent::Enter);
    controller.handle_pointer(PointerEvent::Down {
        pointer_id,
        hit_point: hit.point,
    });

    // Im Kreis ziehen
    for i in 0..PHASE_FRAMES {
        let angle = i as f32 / PHASE_FRAMES as f32 * std::f32::consts::TAU;
        let ndc = grab_ndc + Vec2::new(angle.cos(), angle.sin()) * 0.15;
        controller.handle_pointer(PointerEvent::Move { ndc });
        controller.frame(clock.tick(ndc));
    }

    controller.handle_pointer(PointerEvent::Up { pointer_id });
    controller.handle_pointer(PointerEvent::Leave);

    // Ausschwingen
    let rest_ndc = controller.pointer_ndc();
    for _ in 0..PHASE_FRAMES {
        controller.frame(clock.tick(rest_ndc));
    }

    let rope = controller.rope_points();
    log::info!(
        "Demo beendet: {} Frames, {} Aufweck-Runden, Seil {} Punkte ({:?} -> {:?})",
        controller.frame_count(),
        controller.wake_rounds(),
        rope.len(),
        rope.first(),
        rope.last()
    );
    log::info!(
        "Host: {} Frames, Cursor-Verlauf {:?}",
        controller.host().frames_submitted(),
        controller.host().cursor_history()
    );

    Ok(())
}

/// Feste Demo-Uhr.
#[derive(Default)]
struct DemoClock {
    elapsed: f32,
}

impl DemoClock {
    fn tick(&mut self, pointer_ndc: Vec2) -> FrameState {
        self.elapsed += FRAME_DELTA;
        FrameState {
            elapsed: self.elapsed,
            delta: FRAME_DELTA,
            pointer_ndc,
        }
    }
}
