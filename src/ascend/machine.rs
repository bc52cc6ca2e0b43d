use bevy::prelude::*;

use super::state::{AscendConfig, AscendMode, TraversalPhase, TraversalRequest};
use super::timing::{approach_duration, pass_through_duration};
use crate::player::{ControlFlags, PlayerVelocity};

/// Side effects the machine emits at phase boundaries.
///
/// `LockControls`/`UnlockControls` are applied straight to the player's
/// [`ControlFlags`]; everything else is forwarded as a message for the
/// camera, animation, and UI collaborators.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum TraversalEffect {
    ActivateTraversalCam,
    ActivateDefaultCam,
    /// Restrict rendering to the player's own dressing
    EnterPassThroughRender,
    RestoreFullRender,
    ShowAscendBackdrop,
    ShowDescendBackdrop,
    HideBackdrop,
    SetAscending(bool),
    SetMoveSpeed(f32),
    ShowExitPrompt,
    HideExitPrompt,
    LockControls,
    UnlockControls,
}

/// Command available while the player waits just below the landing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalCommand {
    /// Rise out of the ground and stand on the landing surface
    Exit,
    /// Travel back down to the origin point
    Descend,
}

/// What one `tick` produced: an optional new player position, side effects
/// to apply, and whether the traversal has returned to `Idle`.
#[derive(Debug, Default)]
pub struct TickStep {
    pub position: Option<Vec3>,
    pub effects: Vec<TraversalEffect>,
    pub done: bool,
}

/// The phased motion sequencer for one traversal.
///
/// Present on the player only while a traversal is active; advancing is an
/// explicit `tick(dt)` call, so the whole sequence can be driven with
/// synthetic deltas. Once begun, the sequence is not interruptible until
/// `WaitingAtTop` — a cancel mid-flight would strand the player inside
/// geometry.
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct AscendTraversal {
    request: TraversalRequest,
    approach_time: f32,
    pass_through_time: f32,
    exit_time: f32,
    pre_roll: f32,
    dwell: f32,
    half_height: f32,
    phase: TraversalPhase,
    elapsed: f32,
    moving: bool,
    pending: Option<TraversalCommand>,
}

impl AscendTraversal {
    /// Creates the machine in `ApproachingCeiling` and returns the entry
    /// effects. Point ordering was already validated by
    /// [`TraversalRequest::new`].
    pub fn begin(
        request: TraversalRequest,
        config: &AscendConfig,
        half_height: f32,
    ) -> (Self, Vec<TraversalEffect>) {
        let machine = Self {
            request,
            approach_time: approach_duration(request.origin.distance(request.ceiling), config),
            pass_through_time: pass_through_duration(
                request.ceiling.distance(request.target),
                config,
            ),
            exit_time: config.exit_time,
            pre_roll: config.pre_roll,
            dwell: config.ceiling_dwell,
            half_height,
            phase: TraversalPhase::ApproachingCeiling,
            elapsed: 0.0,
            moving: false,
            pending: None,
        };

        let effects = vec![
            TraversalEffect::LockControls,
            TraversalEffect::ActivateTraversalCam,
            TraversalEffect::SetAscending(true),
        ];

        (machine, effects)
    }

    pub fn phase(&self) -> TraversalPhase {
        self.phase
    }

    pub fn request(&self) -> &TraversalRequest {
        &self.request
    }

    /// Duration used for both the upward pass-through and a later descend.
    pub fn pass_through_time(&self) -> f32 {
        self.pass_through_time
    }

    /// Files an Exit/Descend command. Accepted only while `WaitingAtTop`
    /// with no command already pending; anything else is a no-op.
    pub fn command(&mut self, command: TraversalCommand) -> bool {
        if self.phase == TraversalPhase::WaitingAtTop && self.pending.is_none() {
            self.pending = Some(command);
            true
        } else {
            false
        }
    }

    /// Position just below the ceiling, head touching the surface.
    fn below_ceiling(&self) -> Vec3 {
        self.request.ceiling - Vec3::Y * self.half_height
    }

    /// Position just below the landing surface, where the player waits.
    fn below_target(&self) -> Vec3 {
        self.request.target - Vec3::Y * self.half_height
    }

    /// Standing on the landing surface, feet exactly at surface level.
    fn standing_on_target(&self) -> Vec3 {
        self.request.target + Vec3::Y * self.half_height
    }

    fn enter(&mut self, phase: TraversalPhase) {
        self.phase = phase;
        self.elapsed = 0.0;
        self.moving = false;
    }

    /// Advances the sequence by `dt` seconds.
    ///
    /// Every interpolation snaps exactly onto its endpoint when the phase
    /// duration is reached, so no drift accumulates across phases.
    pub fn tick(&mut self, dt: f32) -> TickStep {
        let mut step = TickStep::default();
        self.elapsed += dt;

        match self.phase {
            TraversalPhase::Idle => {}

            TraversalPhase::ApproachingCeiling => {
                // Hold still through the pre-roll pause
                let t = self.elapsed - self.pre_roll;
                if t >= 0.0 {
                    let u = (t / self.approach_time).min(1.0);
                    step.position = Some(self.request.origin.lerp(self.below_ceiling(), u));

                    if t >= self.approach_time {
                        step.position = Some(self.below_ceiling());
                        self.enter(TraversalPhase::PassingThrough);
                    }
                }
            }

            TraversalPhase::PassingThrough => {
                // Dwell at the ceiling before pushing through
                let t = self.elapsed - self.dwell;
                if t >= 0.0 {
                    if !self.moving {
                        self.moving = true;
                        step.effects.push(TraversalEffect::ShowAscendBackdrop);
                        step.effects.push(TraversalEffect::EnterPassThroughRender);
                    }

                    let u = (t / self.pass_through_time).min(1.0);
                    step.position = Some(self.below_ceiling().lerp(self.below_target(), u));

                    if t >= self.pass_through_time {
                        step.position = Some(self.below_target());
                        step.effects.extend([
                            TraversalEffect::HideBackdrop,
                            TraversalEffect::RestoreFullRender,
                            TraversalEffect::SetAscending(false),
                            TraversalEffect::SetMoveSpeed(0.0),
                            TraversalEffect::ShowExitPrompt,
                        ]);
                        self.enter(TraversalPhase::WaitingAtTop);
                    }
                }
            }

            TraversalPhase::WaitingAtTop => {
                // Suspended until an external command arrives; the command
                // is consumed here, on the tick after it was filed
                if let Some(command) = self.pending.take() {
                    step.effects.push(TraversalEffect::HideExitPrompt);
                    step.effects.push(TraversalEffect::SetAscending(true));

                    match command {
                        TraversalCommand::Exit => self.enter(TraversalPhase::Exiting),
                        TraversalCommand::Descend => {
                            step.effects.push(TraversalEffect::ShowDescendBackdrop);
                            step.effects.push(TraversalEffect::EnterPassThroughRender);
                            self.enter(TraversalPhase::Descending);
                        }
                    }
                }
            }

            TraversalPhase::Exiting => {
                let u = (self.elapsed / self.exit_time).min(1.0);
                step.position = Some(self.below_target().lerp(self.standing_on_target(), u));

                if self.elapsed >= self.exit_time {
                    step.position = Some(self.standing_on_target());
                    step.effects.extend([
                        TraversalEffect::UnlockControls,
                        TraversalEffect::SetAscending(false),
                        TraversalEffect::ActivateDefaultCam,
                    ]);
                    self.enter(TraversalPhase::Idle);
                    step.done = true;
                }
            }

            TraversalPhase::Descending => {
                // Descent mirrors the upward pass-through timing exactly
                let u = (self.elapsed / self.pass_through_time).min(1.0);
                step.position = Some(self.below_target().lerp(self.request.origin, u));

                if self.elapsed >= self.pass_through_time {
                    step.position = Some(self.request.origin);
                    step.effects.extend([
                        TraversalEffect::HideBackdrop,
                        TraversalEffect::RestoreFullRender,
                        TraversalEffect::UnlockControls,
                        TraversalEffect::SetAscending(false),
                        TraversalEffect::ActivateDefaultCam,
                    ]);
                    self.enter(TraversalPhase::Idle);
                    step.done = true;
                }
            }
        }

        step
    }
}

/// Applies a lock/unlock effect to the player's control flags.
/// Returns false for effects meant for other collaborators.
pub fn apply_control_effect(effect: TraversalEffect, flags: &mut ControlFlags) -> bool {
    match effect {
        TraversalEffect::LockControls => {
            flags.can_move = false;
            flags.can_use_gravity = false;
            true
        }
        TraversalEffect::UnlockControls => {
            flags.can_move = true;
            flags.can_use_gravity = true;
            true
        }
        _ => false,
    }
}

/// Advances every active traversal by one tick, moving the player and
/// fanning side effects out to the collaborator systems.
pub fn drive_traversal(
    mut commands: Commands,
    mut query: Query<(
        Entity,
        &mut Transform,
        &mut AscendTraversal,
        &mut ControlFlags,
        &mut PlayerVelocity,
    )>,
    mut writer: MessageWriter<TraversalEffect>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut traversal, mut flags, mut velocity) in &mut query {
        let step = traversal.tick(dt);

        if let Some(position) = step.position {
            transform.translation = position;
        }

        // The machine owns the body while active
        velocity.0 = Vec3::ZERO;

        for effect in step.effects {
            if !apply_control_effect(effect, &mut flags) {
                writer.write(effect);
            }
        }

        if step.done {
            // A finished traversal also disarms the ability
            commands.entity(entity).remove::<AscendTraversal>();
            commands.entity(entity).remove::<AscendMode>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.1;

    fn request() -> TraversalRequest {
        TraversalRequest::new(
            Vec3::ZERO,
            Vec3::new(0.0, 6.0, 0.0),
            Vec3::new(0.0, 12.0, 0.0),
        )
        .unwrap()
    }

    fn begin() -> (AscendTraversal, Vec<TraversalEffect>) {
        AscendTraversal::begin(request(), &AscendConfig::default(), 0.9)
    }

    /// Ticks until the machine reports the wanted phase, bounded
    fn run_until(machine: &mut AscendTraversal, phase: TraversalPhase) -> Vec<TraversalEffect> {
        let mut effects = Vec::new();
        for _ in 0..1000 {
            effects.extend(machine.tick(DT).effects);
            if machine.phase() == phase {
                return effects;
            }
        }
        panic!("never reached {phase:?}");
    }

    #[test]
    fn entry_locks_controls_and_starts_approach() {
        let (machine, effects) = begin();
        assert_eq!(machine.phase(), TraversalPhase::ApproachingCeiling);
        assert!(effects.contains(&TraversalEffect::LockControls));
        assert!(effects.contains(&TraversalEffect::ActivateTraversalCam));
        assert!(effects.contains(&TraversalEffect::SetAscending(true)));
    }

    #[test]
    fn pre_roll_holds_position() {
        let (mut machine, _) = begin();
        // Default pre-roll is 0.75s: the first seven 0.1s ticks stay put
        for _ in 0..7 {
            assert!(machine.tick(DT).position.is_none());
        }
        assert!(machine.tick(DT).position.is_some());
    }

    #[test]
    fn approach_snaps_below_ceiling() {
        let (mut machine, _) = begin();
        let mut last = None;
        while machine.phase() == TraversalPhase::ApproachingCeiling {
            if let Some(p) = machine.tick(DT).position {
                last = Some(p);
            }
        }
        // Position at the phase boundary is exact, no interpolation residue
        assert_eq!(last.unwrap(), Vec3::new(0.0, 6.0 - 0.9, 0.0));
    }

    #[test]
    fn pass_through_effects_fire_once() {
        let (mut machine, _) = begin();
        let effects = run_until(&mut machine, TraversalPhase::WaitingAtTop);

        let backdrops = effects
            .iter()
            .filter(|e| **e == TraversalEffect::ShowAscendBackdrop)
            .count();
        let isolations = effects
            .iter()
            .filter(|e| **e == TraversalEffect::EnterPassThroughRender)
            .count();
        assert_eq!(backdrops, 1);
        assert_eq!(isolations, 1);

        // Arrival restores rendering and parks the animation
        assert!(effects.contains(&TraversalEffect::RestoreFullRender));
        assert!(effects.contains(&TraversalEffect::HideBackdrop));
        assert!(effects.contains(&TraversalEffect::SetAscending(false)));
        assert!(effects.contains(&TraversalEffect::SetMoveSpeed(0.0)));
        assert!(effects.contains(&TraversalEffect::ShowExitPrompt));
    }

    #[test]
    fn waits_indefinitely_without_command() {
        let (mut machine, _) = begin();
        run_until(&mut machine, TraversalPhase::WaitingAtTop);

        for _ in 0..500 {
            let step = machine.tick(DT);
            assert!(step.position.is_none());
            assert!(!step.done);
        }
        assert_eq!(machine.phase(), TraversalPhase::WaitingAtTop);
    }

    #[test]
    fn commands_rejected_outside_waiting() {
        let (mut machine, _) = begin();
        assert!(!machine.command(TraversalCommand::Exit));
        assert!(!machine.command(TraversalCommand::Descend));

        run_until(&mut machine, TraversalPhase::WaitingAtTop);
        assert!(machine.command(TraversalCommand::Exit));
        // Second command while one is pending is a no-op
        assert!(!machine.command(TraversalCommand::Descend));
    }

    #[test]
    fn exit_ends_standing_on_surface() {
        let (mut machine, _) = begin();
        run_until(&mut machine, TraversalPhase::WaitingAtTop);
        machine.command(TraversalCommand::Exit);

        let mut last = None;
        let mut effects = Vec::new();
        let mut done = false;
        for _ in 0..1000 {
            let step = machine.tick(DT);
            if let Some(p) = step.position {
                last = Some(p);
            }
            effects.extend(step.effects);
            if step.done {
                done = true;
                break;
            }
        }

        assert!(done);
        assert_eq!(machine.phase(), TraversalPhase::Idle);
        // Feet exactly at the landing surface
        assert_eq!(last.unwrap(), Vec3::new(0.0, 12.0 + 0.9, 0.0));
        assert!(effects.contains(&TraversalEffect::UnlockControls));
        assert!(effects.contains(&TraversalEffect::ActivateDefaultCam));
        assert!(effects.contains(&TraversalEffect::HideExitPrompt));
    }

    #[test]
    fn descend_returns_to_origin_with_symmetric_timing() {
        let (mut machine, _) = begin();
        run_until(&mut machine, TraversalPhase::WaitingAtTop);

        // Descent reuses the pass-through duration computed at entry
        let config = AscendConfig::default();
        let expected_time = crate::ascend::timing::pass_through_duration(6.0, &config);
        assert_eq!(machine.pass_through_time(), expected_time);

        machine.command(TraversalCommand::Descend);
        machine.tick(DT); // consume the command
        assert_eq!(machine.phase(), TraversalPhase::Descending);

        let mut down_ticks = 0;
        let mut last = None;
        for _ in 0..1000 {
            let step = machine.tick(DT);
            if step.position.is_some() {
                down_ticks += 1;
                last = step.position;
            }
            if step.done {
                break;
            }
        }

        assert_eq!(machine.phase(), TraversalPhase::Idle);
        assert_eq!(last.unwrap(), Vec3::ZERO);
        assert_eq!(down_ticks, (expected_time / DT).ceil() as usize);
    }

    #[test]
    fn unlock_only_happens_at_the_end() {
        let (mut machine, entry) = begin();
        assert!(entry.contains(&TraversalEffect::LockControls));

        let mut effects = run_until(&mut machine, TraversalPhase::WaitingAtTop);
        assert!(!effects.contains(&TraversalEffect::UnlockControls));

        machine.command(TraversalCommand::Exit);
        loop {
            let step = machine.tick(DT);
            effects.extend(step.effects);
            if step.done {
                break;
            }
        }
        assert!(effects.contains(&TraversalEffect::UnlockControls));
    }

    #[test]
    fn request_rejects_inverted_points() {
        assert!(TraversalRequest::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0), Vec3::Y).is_none());
        assert!(
            TraversalRequest::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 2.0, 0.0))
                .is_none()
        );
    }
}
