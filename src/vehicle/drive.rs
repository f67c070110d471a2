//! Drive model: wheel torque, steering and braking.
//!
//! The constants keep the sweeper's hand-tuned feel, including its
//! quirks: motor torque is scaled by frame time, while steering smoothing
//! and brake torque are per-frame values.

use bevy::prelude::*;

use crate::core::VehicleTuning;

use super::components::{Axel, Sweeper, Wheel};

/// Fixed gain applied on top of `max_acceleration`.
pub const TORQUE_GAIN: f32 = 600.0;
/// Fraction of the remaining steer angle covered each frame.
pub const STEER_LERP: f32 = 0.6;

/// Drive parameters of one vehicle.
#[derive(Debug, Clone, Copy)]
pub struct DriveModel {
    pub max_acceleration: f32,
    pub brake_acceleration: f32,
    pub turn_sensitivity: f32,
    pub max_steer_angle: f32,
}

impl From<&VehicleTuning> for DriveModel {
    fn from(tuning: &VehicleTuning) -> Self {
        Self {
            max_acceleration: tuning.max_acceleration,
            brake_acceleration: tuning.brake_acceleration,
            turn_sensitivity: tuning.turn_sensitivity,
            max_steer_angle: tuning.max_steer_angle,
        }
    }
}

impl DriveModel {
    pub fn motor_torque(&self, move_input: f32, dt: f32) -> f32 {
        move_input * TORQUE_GAIN * self.max_acceleration * dt
    }

    pub fn steer_angle(&self, current: f32, steer_input: f32) -> f32 {
        let target = steer_input * self.turn_sensitivity * self.max_steer_angle;
        current + (target - current) * STEER_LERP
    }

    pub fn brake_torque(&self, braking: bool) -> f32 {
        if braking {
            self.brake_acceleration
        } else {
            0.0
        }
    }

    /// Move, steer and brake one wheel for this frame.
    pub fn apply(&self, sweeper: &Sweeper, wheel: &mut Wheel, dt: f32) {
        wheel.motor_torque = self.motor_torque(sweeper.move_input, dt);
        if wheel.axel == Axel::Front {
            wheel.steer_angle = self.steer_angle(wheel.steer_angle, sweeper.steer_input);
        }
        wheel.brake_torque = self.brake_torque(sweeper.braking);
    }
}

/// Yaw step for the brush at `index`: even brushes spin one way, odd the other.
pub fn brush_yaw_step(index: usize, rotation_speed: f32, dt: f32) -> f32 {
    let direction = if index % 2 == 0 { 1.0 } else { -1.0 };
    (rotation_speed * dt * direction).to_radians()
}
