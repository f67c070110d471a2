//! Driver input, drive model application and brush animation.

use bevy::prelude::*;

use crate::core::GameplayConfig;

use super::components::{Brush, DriveControl, Sweeper, Wheel};
use super::drive::{brush_yaw_step, DriveModel};

fn axis(keyboard: &ButtonInput<KeyCode>, positive: [KeyCode; 2], negative: [KeyCode; 2]) -> f32 {
    let mut value = 0.0;
    if keyboard.any_pressed(positive) {
        value += 1.0;
    }
    if keyboard.any_pressed(negative) {
        value -= 1.0;
    }
    value
}

/// Read the driver's controls. T toggles the brushes.
pub fn sweeper_input(keyboard: Res<ButtonInput<KeyCode>>, mut sweepers: Query<&mut Sweeper>) {
    for mut sweeper in sweepers.iter_mut() {
        if !sweeper.has_driver() {
            continue;
        }
        sweeper.move_input = axis(
            &keyboard,
            [KeyCode::KeyW, KeyCode::ArrowUp],
            [KeyCode::KeyS, KeyCode::ArrowDown],
        );
        sweeper.steer_input = axis(
            &keyboard,
            [KeyCode::KeyD, KeyCode::ArrowRight],
            [KeyCode::KeyA, KeyCode::ArrowLeft],
        );
        sweeper.braking = keyboard.pressed(KeyCode::Space);

        if keyboard.just_pressed(KeyCode::KeyT) {
            sweeper.brushes_rotating = !sweeper.brushes_rotating;
            info!("Brushes {}", if sweeper.brushes_rotating { "on" } else { "off" });
        }
    }
}

/// Push the drive model into the wheels.
///
/// Without a driver the throttle is released but steering and brakes keep
/// their last state.
pub fn apply_drive(
    time: Res<Time>,
    config: Res<GameplayConfig>,
    sweepers: Query<&Sweeper>,
    mut wheels: Query<&mut Wheel>,
) {
    let model = DriveModel::from(&config.vehicle);
    let dt = time.delta_secs();

    for sweeper in sweepers.iter() {
        for &wheel_entity in &sweeper.wheels {
            let Ok(mut wheel) = wheels.get_mut(wheel_entity) else {
                continue;
            };
            if sweeper.has_driver() {
                model.apply(sweeper, &mut wheel, dt);
            } else if wheel.motor_torque != 0.0 {
                wheel.motor_torque = 0.0;
            }
        }
    }
}

/// Spin the brushes of driven sweepers that have them switched on.
pub fn spin_brushes(
    time: Res<Time>,
    sweepers: Query<&Sweeper>,
    mut brushes: Query<(&Brush, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for sweeper in sweepers.iter() {
        if !sweeper.has_driver() || !sweeper.brushes_rotating {
            continue;
        }
        for (index, &brush_entity) in sweeper.brushes.iter().enumerate() {
            let Ok((brush, mut transform)) = brushes.get_mut(brush_entity) else {
                continue;
            };
            transform.rotate_y(brush_yaw_step(index, brush.rotation_speed, dt));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::Axel;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(20)));
        app.init_resource::<ButtonInput<KeyCode>>();
        app.insert_resource(GameplayConfig::default());
        app.add_systems(Update, (sweeper_input, apply_drive, spin_brushes).chain());
        // Settle the first zero-length frame
        app.update();
        app
    }

    fn spawn_sweeper(app: &mut App, driven: bool) -> (Entity, Vec<Entity>, Vec<Entity>) {
        let world = app.world_mut();
        let wheels: Vec<Entity> = [Axel::Front, Axel::Front, Axel::Rear, Axel::Rear]
            .into_iter()
            .map(|axel| world.spawn(Wheel::new(axel, 0.35)).id())
            .collect();
        let brushes: Vec<Entity> = (0..2)
            .map(|_| {
                world
                    .spawn((Brush { rotation_speed: 90.0 }, Transform::default()))
                    .id()
            })
            .collect();
        let mut sweeper = Sweeper {
            wheels: wheels.clone(),
            brushes: brushes.clone(),
            ..default()
        };
        if driven {
            sweeper.start_driving();
        }
        let entity = world.spawn(sweeper).id();
        (entity, wheels, brushes)
    }

    fn hold(app: &mut App, keys: &[KeyCode]) {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.release_all();
        input.clear();
        for key in keys {
            input.press(*key);
        }
    }

    #[test]
    fn driver_throttle_and_steer_reach_wheels() {
        let mut app = test_app();
        let (_, wheels, _) = spawn_sweeper(&mut app, true);

        hold(&mut app, &[KeyCode::KeyW, KeyCode::KeyD]);
        app.update();

        let world = app.world();
        let torques: Vec<f32> = wheels
            .iter()
            .map(|e| world.get::<Wheel>(*e).unwrap().motor_torque)
            .collect();
        assert!(torques[0] > 0.0);
        assert!(torques.iter().all(|t| (t - torques[0]).abs() < 1e-4));
        assert!(world.get::<Wheel>(wheels[0]).unwrap().steer_angle > 0.0);
        assert_eq!(world.get::<Wheel>(wheels[3]).unwrap().steer_angle, 0.0);
    }

    #[test]
    fn no_driver_no_drive() {
        let mut app = test_app();
        let (_, wheels, _) = spawn_sweeper(&mut app, false);

        hold(&mut app, &[KeyCode::KeyW]);
        app.update();

        assert_eq!(app.world().get::<Wheel>(wheels[0]).unwrap().motor_torque, 0.0);
    }

    #[test]
    fn brake_held_sets_brake_torque() {
        let mut app = test_app();
        let (_, wheels, _) = spawn_sweeper(&mut app, true);

        hold(&mut app, &[KeyCode::Space]);
        app.update();
        assert_eq!(app.world().get::<Wheel>(wheels[2]).unwrap().brake_torque, 50.0);

        hold(&mut app, &[]);
        app.update();
        assert_eq!(app.world().get::<Wheel>(wheels[2]).unwrap().brake_torque, 0.0);
    }

    #[test]
    fn brush_toggle_is_sticky_and_spins_opposite() {
        let mut app = test_app();
        let (sweeper, _, brushes) = spawn_sweeper(&mut app, true);

        hold(&mut app, &[KeyCode::KeyT]);
        app.update();
        hold(&mut app, &[]);
        app.update();

        let world = app.world();
        assert!(world.get::<Sweeper>(sweeper).unwrap().brushes_rotating);
        let first = world.get::<Transform>(brushes[0]).unwrap().rotation;
        let second = world.get::<Transform>(brushes[1]).unwrap().rotation;
        let (first_yaw, _, _) = first.to_euler(EulerRot::YXZ);
        let (second_yaw, _, _) = second.to_euler(EulerRot::YXZ);
        assert!(first_yaw > 0.0);
        assert!((first_yaw + second_yaw).abs() < 1e-5);
    }
}
