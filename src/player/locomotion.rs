//! Grounded/airborne locomotion with coyote time and jump buffering.
//!
//! `Locomotion::step` is the whole per-tick rule set. It does not touch the
//! physics world; the movement system feeds it the controller's grounded
//! result and applies what it returns.

use bevy::prelude::*;

use crate::core::PlayerTuning;

use super::components::Locomotion;

/// Input sampled for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocomotionInput {
    /// x = strafe (right positive), y = forward (forward positive)
    pub axes: Vec2,
    pub run: bool,
    pub jump_pressed: bool,
    /// Yaw of the active camera, radians
    pub camera_yaw: f32,
}

/// What the movement system should do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionFrame {
    /// Camera-relative heading, unit length or zero
    pub direction: Vec3,
    /// Stick deflection, 0..=1
    pub input_magnitude: f32,
    /// Value for the animator's input magnitude (halved unless running)
    pub animation_magnitude: f32,
    /// Whether the controller may step up ledges this tick
    pub step_offset_enabled: bool,
    /// Explicit velocity while airborne; `None` when grounded, where
    /// horizontal motion comes from root motion instead.
    pub airborne_velocity: Option<Vec3>,
}

/// Heading in world space for the given axes and camera yaw.
///
/// Returns the normalized direction and the clamped input magnitude.
pub fn movement_direction(axes: Vec2, camera_yaw: f32) -> (Vec3, f32) {
    let raw = Vec3::new(axes.x, 0.0, -axes.y);
    let magnitude = raw.length().clamp(0.0, 1.0);
    let direction = (Quat::from_rotation_y(camera_yaw) * raw).normalize_or_zero();
    (direction, magnitude)
}

/// Rotate `current` toward facing `direction` by at most `max_degrees`.
pub fn rotate_towards(current: Quat, direction: Vec3, max_degrees: f32) -> Quat {
    if direction == Vec3::ZERO {
        return current;
    }
    let target = Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation;
    let angle = current.angle_between(target);
    let max_angle = max_degrees.to_radians();
    if angle <= max_angle || angle <= f32::EPSILON {
        target
    } else {
        current.slerp(target, max_angle / angle)
    }
}

fn within(now: f32, stamp: Option<f32>, window: f32) -> bool {
    stamp.is_some_and(|t| now - t <= window)
}

impl Locomotion {
    /// Advance one tick.
    ///
    /// `controller_grounded` is the physics query result for this tick and
    /// `now` the current clock time in seconds.
    pub fn step(
        &mut self,
        input: &LocomotionInput,
        controller_grounded: bool,
        now: f32,
        dt: f32,
        tuning: &PlayerTuning,
    ) -> LocomotionFrame {
        let (direction, input_magnitude) = movement_direction(input.axes, input.camera_yaw);
        let animation_magnitude = if input.run {
            input_magnitude
        } else {
            input_magnitude * 0.5
        };

        // A rising capsule is still close to the floor for a few ticks after
        // takeoff; a ground hit then must not cancel the jump.
        let rising = self.vertical_speed > 0.0;
        self.vertical_speed += tuning.gravity_y * dt;

        if controller_grounded && !rising {
            self.last_grounded_time = Some(now);
        }
        if input.jump_pressed {
            self.jump_requested_time = Some(now);
        }

        let grace = tuning.jump_grace_period;
        let step_offset_enabled;
        if within(now, self.last_grounded_time, grace) {
            step_offset_enabled = true;
            self.vertical_speed = tuning.ground_stick_speed;
            self.is_grounded = true;
            self.is_jumping = false;
            self.is_falling = false;

            if within(now, self.jump_requested_time, grace) {
                self.vertical_speed = tuning.jump_speed;
                self.is_jumping = true;
                self.jump_requested_time = None;
                self.last_grounded_time = None;
            }
        } else {
            // No stepping in the air, or slopes catch the capsule
            step_offset_enabled = false;
            self.is_grounded = false;

            if (self.is_jumping && self.vertical_speed < 0.0)
                || self.vertical_speed < tuning.falling_threshold
            {
                self.is_falling = true;
            }
        }

        let airborne_velocity = (!self.is_grounded).then(|| {
            let mut velocity = direction * input_magnitude * tuning.jump_horizontal_speed;
            velocity.y = self.vertical_speed;
            velocity
        });

        LocomotionFrame {
            direction,
            input_magnitude,
            animation_magnitude,
            step_offset_enabled,
            airborne_velocity,
        }
    }
}
