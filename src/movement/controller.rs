//! Movement domain: the per-tick orchestrator owning every locomotion sub-model.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::combat::{DamageOutcome, Vitals};
use crate::content::{TuningError, validate_tuning};
use crate::movement::components::{Facing, GameLayer};
use crate::movement::models::{
    DashModel, GrappleModel, HorizontalSpeedModel, JumpModel, JumpOutput, JumpPhase,
    RecoveryStep, WallJumpRecovery, WallSlideModel, swing_velocity,
};
use crate::movement::physics::{AnchorSet, BodyHandle, PhysicsBody, PhysicsWorld};
use crate::movement::resources::{MovementInput, MovementTuning, ProbeTuning, RunTuning, WallTuning};
use crate::movement::signals::{AnimationSignals, LocomotionEvent};

/// A ground probe hit while still rising this fast is the ground being left.
const LANDING_RISE_TOLERANCE: f32 = 0.01;
/// Lateral input beyond this, pointing away from the wall, starts ending a slide.
const SLIDE_RELEASE_INPUT: f32 = 0.1;

/// Snapshot of the character, refreshed once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CharacterState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub grounded: bool,
    pub wall_contact: bool,
}

/// Velocity work accumulated during a tick and committed once at the end.
#[derive(Debug, Clone, Copy)]
struct TickFrame {
    velocity: Vec2,
    velocity_dirty: bool,
    impulse: Vec2,
    force: Vec2,
    /// A dash was cut short by wall contact this tick
    dash_interrupted: bool,
}

impl TickFrame {
    fn new(velocity: Vec2) -> Self {
        Self {
            velocity,
            velocity_dirty: false,
            impulse: Vec2::ZERO,
            force: Vec2::ZERO,
            dash_interrupted: false,
        }
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.velocity_dirty = true;
    }

    fn set_lateral(&mut self, vx: f32) {
        self.velocity.x = vx;
        self.velocity_dirty = true;
    }

    fn apply_jump(&mut self, out: JumpOutput) {
        if out.zero_vertical {
            self.velocity.y = 0.0;
            self.velocity_dirty = true;
        }
        self.impulse += out.impulse;
        self.force += out.force;
    }
}

#[derive(Component, Debug, Clone)]
pub struct PlayerLocomotionController {
    state: CharacterState,
    run: RunTuning,
    wall: WallTuning,
    probe: ProbeTuning,
    horizontal: HorizontalSpeedModel,
    jump: JumpModel,
    wall_slide: WallSlideModel,
    recovery: WallJumpRecovery,
    dash: DashModel,
    grapple: GrappleModel,
    vitals: Vitals,
    /// Set by a wall jump, cleared by the recovery bands
    wall_jump_lock: bool,
    /// Damage taken since the last tick, published as `hit` by the next one
    hit_pending: bool,
    signals: AnimationSignals,
    events: Vec<LocomotionEvent>,
}

impl PlayerLocomotionController {
    pub fn new(tuning: &MovementTuning, anchors: AnchorSet) -> Result<Self, TuningError> {
        validate_tuning(tuning)?;
        Ok(Self {
            state: CharacterState::default(),
            run: tuning.run.clone(),
            wall: tuning.wall.clone(),
            probe: tuning.probe.clone(),
            horizontal: HorizontalSpeedModel::new(tuning.run.clone())?,
            jump: JumpModel::new(tuning.jump.clone()),
            wall_slide: WallSlideModel::default(),
            recovery: WallJumpRecovery::default(),
            dash: DashModel::new(tuning.dash.clone()),
            grapple: GrappleModel::new(tuning.grapple.clone(), anchors),
            vitals: Vitals::new(tuning.vitals.clone()),
            wall_jump_lock: false,
            hit_pending: false,
            signals: AnimationSignals::default(),
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    #[cfg(test)]
    pub fn horizontal(&self) -> &HorizontalSpeedModel {
        &self.horizontal
    }

    #[cfg(test)]
    pub fn jump(&self) -> &JumpModel {
        &self.jump
    }

    #[cfg(test)]
    pub fn wall_slide(&self) -> &WallSlideModel {
        &self.wall_slide
    }

    #[cfg(test)]
    pub fn recovery(&self) -> &WallJumpRecovery {
        &self.recovery
    }

    #[cfg(test)]
    pub fn dash(&self) -> &DashModel {
        &self.dash
    }

    #[cfg(test)]
    pub fn grapple(&self) -> &GrappleModel {
        &self.grapple
    }

    #[cfg(test)]
    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn signals(&self) -> &AnimationSignals {
        &self.signals
    }

    pub fn can_move(&self) -> bool {
        !self.wall_jump_lock && !self.vitals.movement_locked()
    }

    /// Takes the events recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<LocomotionEvent> {
        std::mem::take(&mut self.events)
    }

    /// One fixed simulation step.
    pub fn tick(
        &mut self,
        input: &MovementInput,
        body: &mut impl PhysicsBody,
        world: &impl PhysicsWorld,
        dt: f32,
    ) {
        let mut frame = TickFrame::new(body.velocity());
        self.state.position = body.position();

        self.advance_timers(dt, &mut frame);

        self.probe_ground(body, world, &mut frame);
        if self.state.grounded {
            self.state.wall_contact = false;
        } else {
            self.probe_wall(body, world, &mut frame);
        }

        self.resolve_wall_jump_recovery(&mut frame);

        if self.can_move() {
            self.drive(input, body, world, dt, &mut frame);
        }

        self.commit(body, frame);
    }

    /// Knockback away from `source`, then stun or the death sequence.
    /// Ignored while invincible.
    pub fn apply_damage(&mut self, amount: f32, source: Vec2, body: &mut impl PhysicsBody) {
        let outcome = self.vitals.apply_damage(amount, body.position(), source);
        let knockback = match outcome {
            DamageOutcome::Ignored => return,
            DamageOutcome::Stunned { knockback } | DamageOutcome::Died { knockback } => knockback,
        };

        self.signals.hit = true;
        self.hit_pending = true;
        self.events.push(LocomotionEvent::Damaged {
            amount,
            hit_points: self.vitals.hit_points(),
        });

        if matches!(outcome, DamageOutcome::Died { .. }) {
            self.release_grapple(0.0, body);
            if self.wall_slide.is_active() {
                self.end_wall_slide();
            }
            self.signals.is_dead = true;
            self.events.push(LocomotionEvent::Died);
            info!("Player died");
        } else {
            debug!(
                "Player hit: amount={}, hit_points={}",
                amount,
                self.vitals.hit_points()
            );
        }

        body.set_velocity(Vec2::ZERO);
        body.apply_impulse(knockback);
    }

    fn advance_timers(&mut self, dt: f32, frame: &mut TickFrame) {
        self.signals.hit = std::mem::take(&mut self.hit_pending);
        self.dash.advance(dt);

        if self.wall_slide.advance(dt) {
            debug!("Wall slide ended by away input");
            self.end_wall_slide();
        }

        let step = self.vitals.advance(dt);
        if step.stop_horizontal {
            frame.set_lateral(0.0);
        }
        if step.request_reload {
            info!("Death sequence finished, requesting scene reload");
            self.events.push(LocomotionEvent::SceneReloadRequested);
        }
    }

    fn surface_mask() -> LayerMask {
        LayerMask::from([GameLayer::Ground, GameLayer::Wall])
    }

    /// Any overlapping body other than our own counts as contact.
    fn touches(&self, world: &impl PhysicsWorld, own: BodyHandle, center: Vec2) -> bool {
        world
            .overlap_circle(center, self.probe.radius, Self::surface_mask())
            .into_iter()
            .any(|hit| hit != own)
    }

    fn probe_ground(
        &mut self,
        body: &mut impl PhysicsBody,
        world: &impl PhysicsWorld,
        frame: &mut TickFrame,
    ) {
        let was_grounded = self.state.grounded;
        let center = self.state.position + self.probe.ground_offset.as_vec2();
        let rising = frame.velocity.y > LANDING_RISE_TOLERANCE;
        self.state.grounded = self.touches(world, body.handle(), center) && !rising;

        if self.state.grounded && !was_grounded {
            debug!(
                "Landed: velocity=({:.2}, {:.2})",
                frame.velocity.x, frame.velocity.y
            );
            self.events.push(LocomotionEvent::Landed);

            self.recovery.disarm();
            self.wall_jump_lock = false;
            if self.grapple.tuning().release_on_land {
                self.release_grapple(frame.velocity.x, body);
            }
            if self.wall_slide.is_active() {
                self.end_wall_slide();
            }
            self.jump.land();

            self.signals.is_jumping = false;
            self.signals.jump_up = false;
            self.signals.is_double_jumping = false;
        } else if !self.state.grounded && was_grounded {
            self.events.push(LocomotionEvent::Fell);
        }
    }

    fn probe_wall(
        &mut self,
        body: &mut impl PhysicsBody,
        world: &impl PhysicsWorld,
        frame: &mut TickFrame,
    ) {
        let offset = self
            .wall_slide
            .wall_probe_offset(self.state.facing.sign(), self.probe.wall_offset);
        let center = self.state.position + offset;
        self.state.wall_contact = self.touches(world, body.handle(), center);

        if self.state.wall_contact {
            frame.dash_interrupted = self.dash.interrupt();
            if self.grapple.tuning().release_on_wall {
                self.release_grapple(frame.velocity.x, body);
            }
        }

        // Falling signal
        self.signals.is_jumping = true;
    }

    fn resolve_wall_jump_recovery(&mut self, frame: &mut TickFrame) {
        let facing = self.state.facing.sign();
        match self
            .recovery
            .step(self.state.position.x, facing, frame.velocity.y, &self.wall)
        {
            RecoveryStep::Idle | RecoveryStep::StillLocked | RecoveryStep::Disarmed => {}
            RecoveryStep::Unlock => self.wall_jump_lock = false,
            RecoveryStep::UnlockAndBoost => {
                self.wall_jump_lock = false;
                frame.set_lateral(facing * self.wall.recovery.boost_speed);
            }
            RecoveryStep::Release => frame.set_lateral(0.0),
        }
        if !self.recovery.is_armed() {
            self.wall_jump_lock = false;
        }
    }

    fn drive(
        &mut self,
        input: &MovementInput,
        body: &mut impl PhysicsBody,
        world: &impl PhysicsWorld,
        dt: f32,
        frame: &mut TickFrame,
    ) {
        if input.grapple_launch {
            self.try_launch_grapple(body, world, frame);
        }
        if input.grapple_release {
            self.release_grapple(frame.velocity.x, body);
        }
        // The distance constraint owns velocity while swinging
        if self.grapple.is_engaged() {
            return;
        }

        if input.dash_just_pressed && self.dash.try_start(self.wall_slide.is_active()) {
            self.on_dash_started();
        }

        if self.dash.is_active() {
            frame.set_velocity(Vec2::new(
                self.state.facing.sign() * self.dash.speed(),
                0.0,
            ));
        } else {
            let speed = self
                .horizontal
                .update(input.lateral, self.state.grounded, dt);
            self.control_lateral(speed, dt, frame);
        }

        self.resolve_vertical(input, dt, frame);
    }

    fn control_lateral(&mut self, speed: f32, dt: f32, frame: &mut TickFrame) {
        let mut velocity = frame.velocity;
        velocity.y = velocity.y.max(-self.run.max_fall_speed);

        velocity.x = if self.run.movement_smoothing > 0.0 {
            let blend = 1.0 - (-dt / self.run.movement_smoothing).exp();
            velocity.x + (speed - velocity.x) * blend
        } else {
            speed
        };
        frame.set_velocity(velocity);

        let facing = self.state.facing.sign();
        if speed * facing < 0.0 && !self.wall_slide.is_active() {
            self.state.facing = self.state.facing.flipped();
        }
    }

    fn resolve_vertical(&mut self, input: &MovementInput, dt: f32, frame: &mut TickFrame) {
        let grounded = self.state.grounded;

        if self.jump.is_charging() {
            frame.apply_jump(self.jump.continue_charge(input.jump_held, dt));
        } else if grounded && input.jump_just_pressed {
            frame.apply_jump(self.jump.start_from_ground());
            self.state.grounded = false;
            self.signals.is_jumping = true;
            self.signals.jump_up = true;
            self.events.push(LocomotionEvent::Jumped);
            debug!("Ground jump");
        } else if !grounded
            && input.jump_just_pressed
            && self.jump.phase() == JumpPhase::Completed
            && !self.wall_slide.is_active()
        {
            if let Some(out) = self.jump.try_double_jump() {
                frame.apply_jump(out);
                self.signals.is_double_jumping = true;
                self.events.push(LocomotionEvent::DoubleJumped);
                debug!("Double jump");
            }
        } else if self.state.wall_contact && !grounded {
            self.resolve_wall_contact(input, frame);
        } else if !self.state.wall_contact && self.wall_slide.can_confirm_loss() {
            debug!("Wall slide ended: contact lost");
            self.end_wall_slide();
        }
    }

    fn resolve_wall_contact(&mut self, input: &MovementInput, frame: &mut TickFrame) {
        if !self.wall_slide.is_active()
            && self
                .wall_slide
                .should_enter(
                    frame.velocity.y,
                    self.dash.is_active() || frame.dash_interrupted,
                )
            && self.wall_slide.try_enter(self.state.grounded, &self.wall)
        {
            self.state.facing = self.state.facing.flipped();
            self.jump.restore_double_jump();
            self.signals.is_wall_sliding = true;
            self.events.push(LocomotionEvent::WallSlideStarted);
            debug!("Wall slide started: facing={:?}", self.state.facing);
        }
        self.dash.interrupt();

        let facing = self.state.facing.sign();
        if self.wall_slide.is_active() {
            if input.lateral * facing > SLIDE_RELEASE_INPUT {
                self.wall_slide.request_end(&self.wall);
            } else {
                frame.set_velocity(self.wall_slide.hold(facing, &self.wall));
            }
        }

        if input.jump_just_pressed && self.wall_slide.is_active() {
            self.signals.is_jumping = true;
            self.signals.jump_up = true;
            frame.set_velocity(Vec2::ZERO);
            frame.impulse += self.jump.wall_jump(facing, &self.wall);
            self.recovery.arm(self.state.position.x);
            self.wall_slide.exit();
            self.signals.is_wall_sliding = false;
            self.wall_jump_lock = true;
            self.events.push(LocomotionEvent::WallJumped);
            debug!("Wall jump from x={:.2}", self.state.position.x);
        } else if input.dash_just_pressed && self.dash.can_dash() {
            if self.wall_slide.is_active() {
                self.end_wall_slide();
            }
            self.jump.restore_double_jump();
            if self.dash.try_start(false) {
                self.on_dash_started();
            }
        }
    }

    fn end_wall_slide(&mut self) {
        self.wall_slide.exit();
        self.jump.restore_double_jump();
        self.signals.is_wall_sliding = false;
        self.events.push(LocomotionEvent::WallSlideEnded);
    }

    fn on_dash_started(&mut self) {
        self.signals.is_dashing = true;
        self.events.push(LocomotionEvent::DashStarted);
        debug!("Dash started: facing={:?}", self.state.facing);
    }

    fn try_launch_grapple(
        &mut self,
        body: &mut impl PhysicsBody,
        world: &impl PhysicsWorld,
        frame: &mut TickFrame,
    ) {
        if self.grapple.is_engaged() || self.state.grounded {
            return;
        }
        let position = self.state.position;
        let Some(candidate) = self.grapple.find_anchor(position, world) else {
            debug!("Grapple launch found no anchor in reach");
            return;
        };

        let distance = self.grapple.engage(&candidate);
        body.enable_distance_constraint(candidate.anchor, distance);
        frame.set_velocity(swing_velocity(frame.velocity, candidate.position - position));

        self.events.push(LocomotionEvent::GrappleEngaged {
            anchor: candidate.anchor,
            anchor_position: candidate.position,
        });
        debug!(
            "Grapple engaged: anchor={:?}, measured={:.2}, rope={:.2}",
            candidate.anchor, candidate.distance, distance
        );
    }

    /// Swing momentum carries into the run model instead of being lost.
    fn release_grapple(&mut self, horizontal_velocity: f32, body: &mut impl PhysicsBody) {
        let Some(carried) = self.grapple.release(horizontal_velocity) else {
            return;
        };
        body.disable_distance_constraint();
        self.horizontal.absorb_momentum(carried);
        self.jump.restore_double_jump();
        self.events.push(LocomotionEvent::GrappleReleased);
        debug!("Grapple released: carried speed={:.2}", carried);
    }

    fn commit(&mut self, body: &mut impl PhysicsBody, frame: TickFrame) {
        if frame.velocity_dirty {
            body.set_velocity(frame.velocity);
        }
        if frame.impulse != Vec2::ZERO {
            body.apply_impulse(frame.impulse);
        }
        if frame.force != Vec2::ZERO {
            body.apply_force(frame.force);
        }

        self.state.velocity = body.velocity();
        if self.state.velocity.y < 0.0 {
            self.signals.jump_up = false;
        }
        self.signals.is_dashing = self.dash.is_active();
        self.signals.is_wall_sliding = self.wall_slide.is_active();
        self.signals.speed = self.horizontal.current_speed().abs();
    }
}
