//! Sweeper vehicle components.

use bevy::prelude::*;

/// Which axle a wheel sits on. Only front wheels steer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axel {
    Front,
    Rear,
}

/// Notifications a driven vehicle accepts from its driver.
pub trait DriveControl {
    fn start_driving(&mut self);
    fn stop_driving(&mut self);
    fn has_driver(&self) -> bool;
}

/// The street sweeper.
///
/// `wheels` and `brushes` are child entities in authoring order; brush order
/// decides spin direction.
#[derive(Component, Debug, Default)]
pub struct Sweeper {
    pub(super) has_driver: bool,
    /// -1 (reverse) ..= 1 (forward)
    pub move_input: f32,
    /// -1 (left) ..= 1 (right)
    pub steer_input: f32,
    pub braking: bool,
    pub brushes_rotating: bool,
    pub wheels: Vec<Entity>,
    pub brushes: Vec<Entity>,
}

impl DriveControl for Sweeper {
    fn start_driving(&mut self) {
        self.has_driver = true;
    }

    fn stop_driving(&mut self) {
        self.has_driver = false;
        self.move_input = 0.0;
        self.steer_input = 0.0;
        self.braking = false;
    }

    fn has_driver(&self) -> bool {
        self.has_driver
    }
}

/// A wheel mount, as seen by the wheel solver.
#[derive(Component, Debug, Clone)]
pub struct Wheel {
    pub axel: Axel,
    /// Degrees, positive steers right
    pub steer_angle: f32,
    pub motor_torque: f32,
    pub brake_torque: f32,
    pub radius: f32,
    /// Accumulated roll angle in radians (visual only)
    pub spin: f32,
    /// Visual model posed from the solver
    pub model: Option<Entity>,
}

impl Wheel {
    pub fn new(axel: Axel, radius: f32) -> Self {
        Self {
            axel,
            steer_angle: 0.0,
            motor_torque: 0.0,
            brake_torque: 0.0,
            radius,
            spin: 0.0,
            model: None,
        }
    }
}

/// A rotating brush. Speed is in degrees per second.
#[derive(Component, Debug, Clone)]
pub struct Brush {
    pub rotation_speed: f32,
}

/// Where the driver sits. Must be a direct child of the vehicle.
#[derive(Component, Debug, Default)]
pub struct Seat;

/// Trigger volume under the brushes.
#[derive(Component, Debug)]
pub struct CleaningZone {
    pub sweeper: Entity,
}
