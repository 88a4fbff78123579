use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::{Vec2, Vec3};
use lanyard_card::core::{CurveKind, ROPE_SAMPLE_COUNT, RopeCurve};
use lanyard_card::{
    FrameState, HeadlessRenderer, LanyardController, LanyardOptions, PointerEvent, PointerId,
    RibbonGeometry,
};
use lanyard_physics::{ChainWorld, RigidBodySimulator};
use std::hint::black_box;

fn build_controller() -> LanyardController<ChainWorld, HeadlessRenderer> {
    let options = LanyardOptions::default();
    LanyardController::new(
        &options,
        ChainWorld::new(options.world_config()),
        HeadlessRenderer::new(&options),
    )
    .expect("Rig-Aufbau fehlgeschlagen")
}

/// Misst: kompletter Frame ohne Drag (Physik + Glättung + Kurve + Szene)
fn bench_idle_frame(c: &mut Criterion) {
    let mut controller = build_controller();
    let mut elapsed = 0.0_f32;

    c.bench_function("frame_idle", |b| {
        b.iter(|| {
            elapsed += 1.0 / 60.0;
            let output = controller.frame(black_box(FrameState {
                elapsed,
                delta: 1.0 / 60.0,
                pointer_ndc: Vec2::ZERO,
            }));
            black_box(output.rope_updated)
        })
    });
}

/// Misst: Frame während eines Drags (inkl. Aufwecken und kinematischem Ziel)
fn bench_drag_frame(c: &mut Criterion) {
    let mut controller = build_controller();
    let card = controller.rig().card;
    let hit_point = controller.simulator().translation(card).unwrap_or(Vec3::ZERO);
    controller.handle_pointer(PointerEvent::Enter);
    controller.handle_pointer(PointerEvent::Down {
        pointer_id: PointerId(1),
        hit_point,
    });
    let mut elapsed = 0.0_f32;

    c.bench_function("frame_dragging", |b| {
        b.iter(|| {
            elapsed += 1.0 / 60.0;
            let pointer_ndc = Vec2::new(elapsed.sin() * 0.3, elapsed.cos() * 0.2);
            let output = controller.frame(black_box(FrameState {
                elapsed,
                delta: 1.0 / 60.0,
                pointer_ndc,
            }));
            black_box(output.kinematic_target)
        })
    });
}

/// Misst: Kurve abtasten und Band-Geometrie aufbauen je Parametrisierung
fn bench_rope_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("rope_sampling");
    let kinds = [
        ("chordal", CurveKind::Chordal),
        ("centripetal", CurveKind::Centripetal),
        ("uniform", CurveKind::CatmullRom { tension: 0.5 }),
    ];

    for (name, kind) in kinds {
        let mut curve = RopeCurve::new(kind);
        curve.set_points(
            Vec3::new(1.5, 2.2, 0.0),
            Vec3::new(1.0, 2.9, 0.1),
            Vec3::new(0.5, 3.5, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
        );
        let mut points = Vec::with_capacity(ROPE_SAMPLE_COUNT);
        let mut ribbon = RibbonGeometry::default();

        group.bench_with_input(BenchmarkId::new("sample_and_ribbon", name), &curve, |b, curve| {
            b.iter(|| {
                curve.sample_into(&mut points, black_box(ROPE_SAMPLE_COUNT));
                ribbon.rebuild(&points);
                black_box(ribbon.triangle_count())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_idle_frame, bench_drag_frame, bench_rope_sampling);
criterion_main!(benches);
