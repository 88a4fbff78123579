mod support;

use approx::assert_relative_eq;
use glam::{Quat, Vec2, Vec3};
use lanyard_card::core::ROPE_SAMPLE_COUNT;
use lanyard_card::{
    FrameState, HeadlessRenderer, LanyardController, LanyardOptions, PointerEvent, PointerId,
    SceneRenderer,
};
use lanyard_physics::{ChainWorld, RigidBodySimulator};
use support::FakeSimulator;

const FRAME_DELTA: f32 = 0.0166;

fn frame_at(index: u32, pointer_ndc: Vec2) -> FrameState {
    FrameState {
        elapsed: index as f32 * FRAME_DELTA,
        delta: FRAME_DELTA,
        pointer_ndc,
    }
}

fn chain_controller() -> LanyardController<ChainWorld, HeadlessRenderer> {
    let options = LanyardOptions::default();
    LanyardController::new(
        &options,
        ChainWorld::new(options.world_config()),
        HeadlessRenderer::new(&options),
    )
    .expect("Rig sollte sich aufbauen lassen")
}

fn fake_controller() -> LanyardController<FakeSimulator, HeadlessRenderer> {
    let options = LanyardOptions::default();
    LanyardController::new(&options, FakeSimulator::new(), HeadlessRenderer::new(&options))
        .expect("Rig sollte sich aufbauen lassen")
}

#[test]
fn test_drag_with_constant_pointer_for_120_frames() {
    let mut controller = chain_controller();
    let card = controller.rig().card;
    let card_start = controller
        .simulator()
        .translation(card)
        .expect("Karte sollte existieren");
    let grab_offset = Vec3::new(0.1, -0.2, 0.0);

    controller.handle_pointer(PointerEvent::Enter);
    controller.handle_pointer(PointerEvent::Down {
        pointer_id: PointerId(1),
        hit_point: card_start + grab_offset,
    });

    let pointer = Vec2::new(0.2, 0.1);
    let expected = controller.host().camera().pointer_to_drag_plane(pointer) - grab_offset;

    for i in 0..120 {
        let output = controller.frame(frame_at(i, pointer));
        let target = output
            .kinematic_target
            .expect("Während des Drags muss ein Ziel gesetzt werden");
        assert_relative_eq!(target.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(target.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(target.z, expected.z, epsilon = 1e-5);
        assert_eq!(controller.rope_points().len(), ROPE_SAMPLE_COUNT);

        let scene = controller
            .host()
            .last_scene()
            .expect("Szene sollte übergeben sein");
        assert_eq!(scene.rope_points.len(), ROPE_SAMPLE_COUNT);
        assert!(scene.dragging);
    }

    let card_now = controller
        .simulator()
        .translation(card)
        .expect("Karte sollte existieren");
    assert_relative_eq!(card_now.x, expected.x, epsilon = 1e-5);
    assert_relative_eq!(card_now.y, expected.y, epsilon = 1e-5);
    assert_eq!(controller.host().frames_submitted(), 120);
}

#[test]
fn test_rope_runs_from_card_joint_to_anchor() {
    let mut controller = chain_controller();
    for i in 0..60 {
        controller.frame(frame_at(i, Vec2::ZERO));
    }

    let rig = *controller.rig();
    let anchor = controller
        .simulator()
        .translation(rig.fixed)
        .expect("Anker sollte existieren");
    let card_joint = controller
        .simulator()
        .translation(rig.j3)
        .expect("j3 sollte existieren");
    let rope = controller.rope_points();

    let first = rope[0];
    let last = rope[rope.len() - 1];
    assert_relative_eq!(first.distance(card_joint), 0.0, epsilon = 1e-4);
    assert_relative_eq!(last.distance(anchor), 0.0, epsilon = 1e-4);
    assert!(last.distance(anchor) < first.distance(anchor));
}

#[test]
fn test_idle_chain_hangs_below_anchor() {
    let mut controller = chain_controller();
    for i in 0..300 {
        controller.frame(frame_at(i, Vec2::ZERO));
    }
    let rig = *controller.rig();
    let card = controller
        .simulator()
        .translation(rig.card)
        .expect("Karte sollte existieren");
    assert!(card.y < 2.0, "Karte hängt nicht: {card:?}");
    assert!(controller.last_kinematic_target().is_none());
}

#[test]
fn test_scene_card_pose_is_interpolated() {
    let mut controller = chain_controller();
    let card = controller.rig().card;
    for i in 0..10 {
        controller.frame(frame_at(i, Vec2::ZERO));
    }
    // 0.0166 s sind knapp zwei Fixed-Steps, der Rest bleibt im Akkumulator
    assert!(controller.simulator().interpolation_alpha() > 0.0);

    let (translation, rotation) = controller
        .simulator()
        .interpolated_pose(card)
        .expect("Karte sollte existieren");
    let pose = controller
        .host()
        .last_scene()
        .and_then(|scene| scene.card_pose)
        .expect("Kartenpose erwartet");
    assert_eq!(pose.translation, translation);
    assert_eq!(pose.rotation, rotation);
}

#[test]
fn test_lag_filter_trails_moving_joints() {
    let mut controller = fake_controller();
    let rig = *controller.rig();
    controller.frame(frame_at(0, Vec2::ZERO));
    let initial = controller
        .lag_filter()
        .get(rig.j1)
        .expect("j1 sollte geglättet sein");

    let jump = initial + Vec3::new(0.0, -1.0, 0.0);
    if let Some(body) = controller.simulator_mut().body_mut(rig.j1) {
        body.position = jump;
    }
    controller.frame(frame_at(1, Vec2::ZERO));

    let smoothed = controller
        .lag_filter()
        .get(rig.j1)
        .expect("j1 sollte geglättet sein");
    assert!(smoothed.y < initial.y);
    assert!(smoothed.y > jump.y);
}

#[test]
fn test_yaw_damping_reduces_angular_y() {
    let mut controller = fake_controller();
    let card = controller.rig().card;
    if let Some(body) = controller.simulator_mut().body_mut(card) {
        body.rotation = Quat::from_xyzw(0.0, 0.5, 0.0, 0.75_f32.sqrt());
        body.angular_velocity = Vec3::new(0.3, 1.0, -0.2);
    }

    let output = controller.frame(frame_at(0, Vec2::ZERO));
    assert!(output.yaw_damped);

    let angular = controller
        .simulator()
        .angular_velocity(card)
        .expect("Karte sollte existieren");
    assert_relative_eq!(angular.x, 0.3);
    assert_relative_eq!(angular.y, 1.0 - 0.5 * 0.2, epsilon = 1e-6);
    assert_relative_eq!(angular.z, -0.2);
}

#[test]
fn test_yaw_damping_without_rotation_does_not_wake() {
    let mut controller = fake_controller();
    controller.frame(frame_at(0, Vec2::ZERO));
    let (_, _, wake) = *controller
        .simulator()
        .angular_writes
        .last()
        .expect("Gier-Dämpfung schreibt jeden Frame");
    assert!(!wake);
}

#[test]
fn test_missing_card_skips_damping_and_pose() {
    let mut controller = fake_controller();
    let card = controller.rig().card;
    controller.simulator_mut().remove(card);

    let output = controller.frame(frame_at(0, Vec2::ZERO));
    assert!(!output.yaw_damped);
    assert!(output.rope_updated);

    let scene = controller
        .host()
        .last_scene()
        .expect("Szene sollte trotzdem übergeben werden");
    assert!(scene.card_pose.is_none());
    assert_eq!(scene.rope_points.len(), ROPE_SAMPLE_COUNT);
}

#[test]
fn test_missing_joint_keeps_previous_rope() {
    let mut controller = fake_controller();
    let rig = *controller.rig();
    controller.frame(frame_at(0, Vec2::ZERO));
    let before = controller.rope_points().to_vec();

    controller.simulator_mut().remove(rig.j3);
    let output = controller.frame(frame_at(1, Vec2::ZERO));
    assert!(!output.rope_updated);
    assert_eq!(controller.rope_points(), before.as_slice());
}

#[test]
fn test_every_frame_steps_physics_once() {
    let mut controller = fake_controller();
    for i in 0..5 {
        controller.frame(frame_at(i, Vec2::ZERO));
    }
    assert_eq!(controller.simulator().steps.len(), 5);
    assert!(controller
        .simulator()
        .steps
        .iter()
        .all(|&delta| (delta - FRAME_DELTA).abs() < f32::EPSILON));
}
