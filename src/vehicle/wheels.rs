//! Wheel solver.
//!
//! Rapier has no wheel colliders, so each wheel mount casts a ray to find
//! the ground and turns its motor, brake and steer state into forces on the
//! chassis. The chassis collider itself is frictionless; all traction comes
//! from here.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::GameplayConfig;

use super::components::{Sweeper, Wheel};

/// Rolling speed below which brakes fade out instead of reversing the car.
const BRAKE_FADE_SPEED: f32 = 0.5;

/// Contact state of one wheel for this step.
#[derive(Debug, Clone, Copy)]
pub struct WheelContact {
    /// Wheel heading in world space (steer applied)
    pub forward: Vec3,
    pub right: Vec3,
    /// Velocity of the chassis at the wheel mount
    pub point_velocity: Vec3,
}

/// Force a grounded wheel applies to the chassis.
pub fn wheel_force(wheel: &Wheel, contact: &WheelContact, lateral_grip: f32) -> Vec3 {
    let drive = contact.forward * (wheel.motor_torque / wheel.radius);

    let slip = contact.right.dot(contact.point_velocity);
    let grip = -contact.right * slip * lateral_grip;

    let rolling = contact.forward.dot(contact.point_velocity);
    let fade = (rolling.abs() / BRAKE_FADE_SPEED).min(1.0);
    let brake = -contact.forward * rolling.signum() * fade * (wheel.brake_torque / wheel.radius);

    drive + grip + brake
}

/// Steer rotation for a wheel; positive angles turn right.
pub fn steer_rotation(steer_angle: f32) -> Quat {
    Quat::from_rotation_y(-steer_angle.to_radians())
}

/// Accumulate wheel forces into the chassis.
pub fn solve_wheels(
    time: Res<Time>,
    config: Res<GameplayConfig>,
    rapier_context: Query<&RapierContext>,
    mut chassis_query: Query<(Entity, &GlobalTransform, &Velocity, &mut ExternalForce, &Sweeper)>,
    mut wheels: Query<(&GlobalTransform, &mut Wheel)>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let tuning = &config.vehicle;
    let dt = time.delta_secs();
    let (cx, cy, cz) = tuning.center_of_mass;

    for (chassis, chassis_transform, velocity, mut external, sweeper) in chassis_query.iter_mut() {
        let center_of_mass = chassis_transform.transform_point(Vec3::new(cx, cy, cz));
        let chassis_rotation = chassis_transform.compute_transform().rotation;
        let down = chassis_rotation * Vec3::NEG_Y;

        let mut total = ExternalForce::default();
        for &wheel_entity in &sweeper.wheels {
            let Ok((mount, mut wheel)) = wheels.get_mut(wheel_entity) else {
                continue;
            };
            let mount_pos = mount.translation();
            let wheel_rotation = chassis_rotation * steer_rotation(wheel.steer_angle);
            let contact = WheelContact {
                forward: wheel_rotation * Vec3::NEG_Z,
                right: wheel_rotation * Vec3::X,
                point_velocity: velocity.linvel + velocity.angvel.cross(mount_pos - center_of_mass),
            };

            let rolling = contact.forward.dot(contact.point_velocity);
            wheel.spin += rolling / wheel.radius * dt;

            let grounded = context
                .cast_ray(
                    mount_pos,
                    down,
                    tuning.suspension_length + wheel.radius,
                    true,
                    QueryFilter::default()
                        .exclude_rigid_body(chassis)
                        .exclude_sensors(),
                )
                .is_some();
            if !grounded {
                continue;
            }

            let force = wheel_force(&wheel, &contact, tuning.lateral_grip);
            let at_mount = ExternalForce::at_point(force, mount_pos, center_of_mass);
            total.force += at_mount.force;
            total.torque += at_mount.torque;
        }
        *external = total;
    }
}

/// Pose wheel models from the solver state.
pub fn pose_wheel_models(
    wheels: Query<&Wheel>,
    mut models: Query<&mut Transform, Without<Wheel>>,
) {
    for wheel in wheels.iter() {
        let Some(model) = wheel.model else {
            continue;
        };
        let Ok(mut transform) = models.get_mut(model) else {
            continue;
        };
        // Cylinder meshes stand on Y; lay them on their side first
        transform.rotation = steer_rotation(wheel.steer_angle)
            * Quat::from_rotation_x(-wheel.spin)
            * Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::Axel;

    fn contact(point_velocity: Vec3) -> WheelContact {
        WheelContact {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            point_velocity,
        }
    }

    #[test]
    fn motor_torque_pushes_forward() {
        let mut wheel = Wheel::new(Axel::Rear, 0.5);
        wheel.motor_torque = 100.0;
        let force = wheel_force(&wheel, &contact(Vec3::ZERO), 1000.0);
        assert!((force - Vec3::new(0.0, 0.0, -200.0)).length() < 1e-4);
    }

    #[test]
    fn sideways_slip_is_resisted() {
        let wheel = Wheel::new(Axel::Front, 0.5);
        let force = wheel_force(&wheel, &contact(Vec3::new(2.0, 0.0, 0.0)), 100.0);
        assert!(force.x < 0.0);
        assert_eq!(force.z, 0.0);
    }

    #[test]
    fn brake_opposes_rolling() {
        let mut wheel = Wheel::new(Axel::Rear, 0.5);
        wheel.brake_torque = 50.0;
        let force = wheel_force(&wheel, &contact(Vec3::new(0.0, 0.0, -5.0)), 0.0);
        assert!((force.z - 100.0).abs() < 1e-4);
        let stopped = wheel_force(&wheel, &contact(Vec3::ZERO), 0.0);
        assert_eq!(stopped, Vec3::ZERO);
    }

    #[test]
    fn positive_steer_turns_right() {
        let heading = steer_rotation(90.0) * Vec3::NEG_Z;
        assert!((heading - Vec3::X).length() < 1e-5);
    }
}
