//! Minimal animator for the player character.
//!
//! There is no skeletal animation in the game, but the locomotion rules are
//! written against an animator: they set named parameters, ask which state is
//! playing, take ground movement from root motion, and wait for an animation
//! event before attaching a picked-up item. This component provides exactly
//! that surface.

use bevy::prelude::*;

use crate::core::PlayerTuning;

/// Animation states of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Locomotion,
    Jump,
    Fall,
    PickUp,
    Driving,
}

/// Events fired at authored points of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEventKind {
    /// Hands reached the item during the pickup clip
    AttachObject,
}

/// An animation event raised by an entity's animator.
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationEvent {
    pub entity: Entity,
    pub kind: AnimationEventKind,
}

/// Parameter block and state of a character animator.
#[derive(Component, Debug, Clone)]
pub struct Animator {
    pub input_magnitude: f32,
    pub is_moving: bool,
    pub is_grounded: bool,
    pub is_jumping: bool,
    pub is_falling: bool,
    pub is_picking: bool,
    pub is_driving: bool,
    state: AnimState,
    state_time: f32,
    attach_fired: bool,
    walk_speed: f32,
    run_speed: f32,
    pickup_duration: f32,
    pickup_attach_time: f32,
}

impl Animator {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            input_magnitude: 0.0,
            is_moving: false,
            is_grounded: true,
            is_jumping: false,
            is_falling: false,
            is_picking: false,
            is_driving: false,
            state: AnimState::Idle,
            state_time: 0.0,
            attach_fired: false,
            walk_speed: tuning.walk_speed,
            run_speed: tuning.run_speed,
            pickup_duration: tuning.pickup_duration,
            pickup_attach_time: tuning.pickup_attach_time,
        }
    }

    pub fn is_state(&self, state: AnimState) -> bool {
        self.state == state
    }

    /// Move `input_magnitude` toward `target`, reaching ~63% in `damp_time`.
    pub fn set_input_magnitude_damped(&mut self, target: f32, damp_time: f32, dt: f32) {
        if damp_time <= 0.0 {
            self.input_magnitude = target;
            return;
        }
        let blend = 1.0 - (-dt / damp_time).exp();
        self.input_magnitude += (target - self.input_magnitude) * blend;
    }

    /// Force an idle, grounded pose (used when sitting down in the sweeper).
    pub fn reset_to_idle(&mut self) {
        self.input_magnitude = 0.0;
        self.is_moving = false;
        self.is_jumping = false;
        self.is_falling = false;
        self.is_grounded = true;
        self.enter(AnimState::Idle);
    }

    /// Horizontal velocity the current clip would move the character with.
    ///
    /// Half magnitude plays the walk cycle, full magnitude the run cycle.
    pub fn root_motion(&self, forward: Vec3) -> Vec3 {
        if self.state != AnimState::Locomotion {
            return Vec3::ZERO;
        }
        let m = self.input_magnitude.clamp(0.0, 1.0);
        let speed = if m <= 0.5 {
            self.walk_speed * (m / 0.5)
        } else {
            self.walk_speed + (self.run_speed - self.walk_speed) * ((m - 0.5) / 0.5)
        };
        let flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        flat * speed
    }

    /// Advance the state machine by `dt`, returning an event if one fired.
    pub fn advance(&mut self, dt: f32) -> Option<AnimationEventKind> {
        self.state_time += dt;

        if self.state == AnimState::PickUp && !self.is_driving {
            let normalized = self.state_time / self.pickup_duration;
            if !self.attach_fired && normalized >= self.pickup_attach_time {
                self.attach_fired = true;
                return Some(AnimationEventKind::AttachObject);
            }
            if normalized >= 1.0 {
                let next = self.ground_state();
                self.enter(next);
            }
            return None;
        }

        let next = if self.is_driving {
            AnimState::Driving
        } else if self.is_picking && self.is_grounded {
            AnimState::PickUp
        } else if !self.is_grounded {
            if self.is_falling {
                AnimState::Fall
            } else if self.is_jumping {
                AnimState::Jump
            } else {
                self.state
            }
        } else {
            self.ground_state()
        };
        if next != self.state {
            self.enter(next);
        }
        None
    }

    fn ground_state(&self) -> AnimState {
        if self.is_moving {
            AnimState::Locomotion
        } else {
            AnimState::Idle
        }
    }

    fn enter(&mut self, state: AnimState) {
        self.state = state;
        self.state_time = 0.0;
        self.attach_fired = false;
    }
}

/// Advance every animator and forward fired events.
pub fn advance_animators(
    time: Res<Time>,
    mut animators: Query<(Entity, &mut Animator)>,
    mut events: EventWriter<AnimationEvent>,
) {
    let dt = time.delta_secs();
    for (entity, mut animator) in animators.iter_mut() {
        if let Some(kind) = animator.advance(dt) {
            events.send(AnimationEvent { entity, kind });
        }
    }
}
