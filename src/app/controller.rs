//! Frame-Loop und Event-Verarbeitung des Lanyard-Widgets.

use glam::{Vec2, Vec3};
use lanyard_physics::{BodyKind, PhysicsError, RigidBodySimulator};

use super::cursor::CursorScope;
use super::drag::{DragController, DragTransition};
use super::events::PointerEvent;
use super::render_scene;
use super::throttle::WakeThrottle;
use crate::core::{LagFilter, ROPE_SAMPLE_COUNT, RigHandles, RopeCurve};
use crate::render::SceneRenderer;
use crate::shared::{CardPose, LanyardOptions};

/// Zeitangaben und Pointer-Position eines Frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Verstrichene Zeit seit Start (Sekunden)
    pub elapsed: f32,
    /// Zeit seit dem letzten Frame (Sekunden)
    pub delta: f32,
    /// Pointer-Position in NDC (-1..1)
    pub pointer_ndc: Vec2,
}

/// Was ein Frame bewirkt hat.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameOutput {
    /// Frame-Nummer
    pub frame: u64,
    /// Gesetzte kinematische Zielposition der Karte
    pub kinematic_target: Option<Vec3>,
    /// Wurden alle Bodies geweckt?
    pub woke_bodies: bool,
    /// Wurde die Seilkurve neu abgetastet?
    pub rope_updated: bool,
    /// Wurde die Gier-Dämpfung angewendet?
    pub yaw_damped: bool,
}

/// Besitzt Simulator, Rig und Host und treibt beide pro Frame an.
pub struct LanyardController<S: RigidBodySimulator, R: SceneRenderer> {
    sim: S,
    host: R,
    rig: RigHandles,
    lag: LagFilter,
    curve: RopeCurve,
    rope_points: Vec<Vec3>,
    drag: DragController,
    throttle: WakeThrottle,
    cursor: CursorScope,
    yaw_damping_factor: f32,
    pointer_ndc: Vec2,
    frame: u64,
    wake_rounds: u64,
    last_kinematic_target: Option<Vec3>,
}

impl<S: RigidBodySimulator, R: SceneRenderer> LanyardController<S, R> {
    /// Registriert das Rig im Simulator und übernimmt Simulator und Host.
    pub fn new(options: &LanyardOptions, mut sim: S, host: R) -> Result<Self, PhysicsError> {
        let rig = options.rig_layout(Vec3::ZERO).build(&mut sim)?;
        log::info!(
            "Lanyard gemountet: Kurve {:?}, Drosselung {} s",
            options.curve_kind,
            options.wake_throttle_secs
        );
        Ok(Self {
            sim,
            host,
            rig,
            lag: options.lag_filter(),
            curve: RopeCurve::new(options.curve_kind),
            rope_points: Vec::with_capacity(ROPE_SAMPLE_COUNT),
            drag: DragController::new(),
            throttle: WakeThrottle::new(options.wake_throttle_secs),
            cursor: CursorScope::new(),
            yaw_damping_factor: options.yaw_damping_factor,
            pointer_ndc: Vec2::ZERO,
            frame: 0,
            wake_rounds: 0,
            last_kinematic_target: None,
        })
    }

    /// Verarbeitet ein Pointer-Event des Hosts.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if let PointerEvent::Move { ndc } = event {
            self.pointer_ndc = ndc;
        }

        let card_translation = self.sim.translation(self.rig.card);
        match self.drag.handle(event, card_translation) {
            DragTransition::Started { pointer_id, .. } => {
                self.host.set_pointer_capture(pointer_id);
                self.sim.set_body_kind(self.rig.card, BodyKind::KinematicPosition);
                self.throttle.reset();
            }
            DragTransition::Released { pointer_id } => {
                self.host.release_pointer_capture(pointer_id);
                self.sim.set_body_kind(self.rig.card, BodyKind::Dynamic);
                self.last_kinematic_target = None;
            }
            DragTransition::HoverChanged { .. } | DragTransition::None => {}
        }

        let desired = self.drag.cursor();
        self.cursor.apply(desired, &mut self.host);
    }

    /// Führt einen Frame aus: Drag, Physik, Glättung, Kurve, Dämpfung, Szene.
    pub fn frame(&mut self, state: FrameState) -> FrameOutput {
        self.frame += 1;
        let mut output = FrameOutput {
            frame: self.frame,
            ..FrameOutput::default()
        };

        if let Some(grab_offset) = self.drag.grab_offset() {
            if self.throttle.should_fire(state.elapsed) {
                for body in self.rig.all() {
                    self.sim.wake_up(body);
                }
                self.wake_rounds += 1;
                output.woke_bodies = true;
            }
            let target = self.host.camera().pointer_to_drag_plane(state.pointer_ndc) - grab_offset;
            self.sim.set_next_kinematic_translation(self.rig.card, target);
            self.last_kinematic_target = Some(target);
            output.kinematic_target = Some(target);
        }

        self.sim.step(state.delta);

        for joint in self.rig.smoothed() {
            match self.sim.translation(joint) {
                Some(actual) => {
                    self.lag.update(joint, actual, state.delta);
                }
                None => log::trace!("Glättung übersprungen: Body {:?} fehlt", joint),
            }
        }

        output.rope_updated = self.regenerate_rope();
        output.yaw_damped = self.damp_yaw();

        let card_pose = self.card_pose();
        let scene = render_scene::build(self.frame, &self.rope_points, card_pose, &self.drag);
        self.host.submit(&scene);

        output
    }

    fn regenerate_rope(&mut self) -> bool {
        let card_joint = self.sim.translation(self.rig.j3);
        let near_joint = self.lag.get(self.rig.j2);
        let far_joint = self.lag.get(self.rig.j1);
        let anchor = self.sim.translation(self.rig.fixed);
        let (Some(card_joint), Some(near_joint), Some(far_joint), Some(anchor)) =
            (card_joint, near_joint, far_joint, anchor)
        else {
            log::debug!("Seilkurve übersprungen: Kontrollpunkt fehlt");
            return false;
        };
        self.curve.set_points(card_joint, near_joint, far_joint, anchor);
        self.curve.sample_into(&mut self.rope_points, ROPE_SAMPLE_COUNT);
        true
    }

    fn damp_yaw(&mut self) -> bool {
        let card = self.rig.card;
        let (Some(angular), Some(rotation)) =
            (self.sim.angular_velocity(card), self.sim.rotation(card))
        else {
            log::trace!("Gier-Dämpfung übersprungen: Karte fehlt");
            return false;
        };
        let damped = Vec3::new(
            angular.x,
            angular.y - rotation.y * self.yaw_damping_factor,
            angular.z,
        );
        // Nur bei echter Änderung wecken
        let changed = damped != angular;
        self.sim.set_angular_velocity(card, damped, changed);
        true
    }

    fn card_pose(&self) -> Option<CardPose> {
        let (translation, rotation) = self.sim.interpolated_pose(self.rig.card)?;
        Some(CardPose {
            translation,
            rotation,
        })
    }

    /// Simulator.
    pub fn simulator(&self) -> &S {
        &self.sim
    }

    /// Simulator (veränderlich).
    pub fn simulator_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    /// Host.
    pub fn host(&self) -> &R {
        &self.host
    }

    /// Host (veränderlich).
    pub fn host_mut(&mut self) -> &mut R {
        &mut self.host
    }

    /// Handles der Rig-Bodies.
    pub fn rig(&self) -> &RigHandles {
        &self.rig
    }

    /// Drag-Zustand.
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Geglättete Gliedpositionen.
    pub fn lag_filter(&self) -> &LagFilter {
        &self.lag
    }

    /// Seilpunkte des letzten Frames (Karte → Anker).
    pub fn rope_points(&self) -> &[Vec3] {
        &self.rope_points
    }

    /// Zuletzt gemeldete Pointer-Position.
    pub fn pointer_ndc(&self) -> Vec2 {
        self.pointer_ndc
    }

    /// Kinematisches Ziel des letzten Drag-Frames.
    pub fn last_kinematic_target(&self) -> Option<Vec3> {
        self.last_kinematic_target
    }

    /// Anzahl Aufweck-Runden seit dem Mount.
    pub fn wake_rounds(&self) -> u64 {
        self.wake_rounds
    }

    /// Anzahl ausgeführter Frames.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

impl<S: RigidBodySimulator, R: SceneRenderer> Drop for LanyardController<S, R> {
    fn drop(&mut self) {
        if let Some(pointer) = self.drag.active_pointer() {
            self.host.release_pointer_capture(pointer);
        }
        if self.cursor.is_acquired() {
            log::debug!("Lanyard abgebaut, Cursor wird zurückgesetzt");
            self.cursor.release(&mut self.host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessRenderer;
    use crate::shared::{CursorIcon, PointerId};
    use lanyard_physics::ChainWorld;

    fn controller() -> LanyardController<ChainWorld, HeadlessRenderer> {
        let options = LanyardOptions::default();
        LanyardController::new(
            &options,
            ChainWorld::new(options.world_config()),
            HeadlessRenderer::new(&options),
        )
        .expect("Rig sollte sich aufbauen lassen")
    }

    fn frame_state(i: u32) -> FrameState {
        FrameState {
            elapsed: i as f32 / 60.0,
            delta: 1.0 / 60.0,
            pointer_ndc: Vec2::ZERO,
        }
    }

    #[test]
    fn test_frame_samples_full_rope() {
        let mut controller = controller();
        let output = controller.frame(frame_state(1));
        assert!(output.rope_updated);
        assert_eq!(controller.rope_points().len(), ROPE_SAMPLE_COUNT);
        assert_eq!(controller.host().frames_submitted(), 1);
    }

    #[test]
    fn test_idle_frame_sets_no_kinematic_target() {
        let mut controller = controller();
        let output = controller.frame(frame_state(1));
        assert!(output.kinematic_target.is_none());
        assert!(!output.woke_bodies);
    }

    #[test]
    fn test_pointer_down_switches_card_to_kinematic() {
        let mut controller = controller();
        let card = controller.rig().card;
        let hit_point = controller.simulator().translation(card).unwrap_or_default();
        controller.handle_pointer(PointerEvent::Enter);
        controller.handle_pointer(PointerEvent::Down {
            pointer_id: PointerId(1),
            hit_point,
        });
        assert_eq!(
            controller.simulator().body_kind(card),
            Some(BodyKind::KinematicPosition)
        );
        assert_eq!(controller.host().captured_pointer(), Some(PointerId(1)));
        assert_eq!(controller.host().cursor(), CursorIcon::Grabbing);
    }

    #[test]
    fn test_drop_restores_cursor_and_releases_capture() {
        let options = LanyardOptions::default();
        let mut host = HeadlessRenderer::new(&options);
        {
            let mut controller =
                LanyardController::new(&options, ChainWorld::new(options.world_config()), &mut host)
                    .expect("Rig sollte sich aufbauen lassen");
            let card = controller.rig().card;
            let hit_point = controller.simulator().translation(card).unwrap_or_default();
            controller.handle_pointer(PointerEvent::Enter);
            controller.handle_pointer(PointerEvent::Down {
                pointer_id: PointerId(4),
                hit_point,
            });
        }
        assert_eq!(host.cursor(), CursorIcon::Auto);
        assert_eq!(host.captured_pointer(), None);
        assert_eq!(
            host.cursor_history(),
            vec![CursorIcon::Grab, CursorIcon::Grabbing, CursorIcon::Auto]
        );
    }
}
