//! Third-person player movement on the kinematic character controller.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::camera::MainCamera;
use crate::core::{GameplayConfig, PlayerTuning};

use super::animator::Animator;
use super::components::*;
use super::locomotion::{rotate_towards, LocomotionInput};

/// Capsule half height (cylinder part) of the player collider.
const CAPSULE_HALF_HEIGHT: f32 = 0.6;
/// Capsule radius of the player collider.
const CAPSULE_RADIUS: f32 = 0.3;
/// Ground ray starts this far above the capsule bottom...
const GROUND_RAY_LIFT: f32 = 0.05;
/// ...and reaches this far below it.
const GROUND_RAY_REACH: f32 = 0.05;

/// Sample this tick's movement keys.
fn read_input(keyboard: &ButtonInput<KeyCode>, camera_yaw: f32) -> LocomotionInput {
    let mut axes = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axes.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axes.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axes.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axes.x += 1.0;
    }

    LocomotionInput {
        axes,
        run: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        jump_pressed: keyboard.just_pressed(KeyCode::Space),
        camera_yaw,
    }
}

/// Walk, run and jump while on foot.
///
/// Ground movement follows the animator's root motion; air movement is
/// computed here. Vertical speed is always injected manually.
pub fn player_locomotion(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<GameplayConfig>,
    rapier_context: Query<&RapierContext>,
    camera_query: Query<&Transform, (With<MainCamera>, Without<Player>)>,
    mut player_query: Query<
        (
            Entity,
            &mut Transform,
            &mut Locomotion,
            &mut Animator,
            &mut KinematicCharacterController,
            &InteractionState,
        ),
        With<Player>,
    >,
) {
    let Ok((player_entity, mut transform, mut locomotion, mut animator, mut controller, state)) =
        player_query.get_single_mut()
    else {
        return;
    };

    if state.is_driving {
        controller.translation = None;
        return;
    }

    let tuning = &config.player;
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    // Ground check using a short ray just under the capsule
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin =
            transform.translation - Vec3::Y * (CAPSULE_HALF_HEIGHT + CAPSULE_RADIUS - GROUND_RAY_LIFT);
        context
            .cast_ray(
                ray_origin,
                Vec3::NEG_Y,
                GROUND_RAY_LIFT + GROUND_RAY_REACH,
                true,
                QueryFilter::default()
                    .exclude_collider(player_entity)
                    .exclude_sensors(),
            )
            .is_some()
    } else {
        true
    };

    let camera_yaw = camera_query
        .get_single()
        .map(|camera| camera.rotation.to_euler(EulerRot::YXZ).0)
        .unwrap_or(0.0);
    let input = read_input(&keyboard, camera_yaw);

    let frame = locomotion.step(&input, is_grounded, now, dt, tuning);

    controller.autostep = frame.step_offset_enabled.then(|| autostep(tuning));

    animator.set_input_magnitude_damped(frame.animation_magnitude, tuning.input_damp_time, dt);
    animator.is_grounded = locomotion.is_grounded;
    animator.is_jumping = locomotion.is_jumping;
    if locomotion.is_falling {
        animator.is_falling = true;
    } else if locomotion.is_grounded {
        animator.is_falling = false;
    }

    if frame.direction != Vec3::ZERO {
        animator.is_moving = true;
        transform.rotation = rotate_towards(transform.rotation, frame.direction, tuning.rotation_speed * dt);
    } else {
        animator.is_moving = false;
    }

    let translation = match frame.airborne_velocity {
        Some(velocity) => velocity * dt,
        None => {
            let forward = transform.forward().as_vec3();
            animator.root_motion(forward) * dt + Vec3::Y * locomotion.vertical_speed * dt
        }
    };
    controller.translation = Some(translation);
}

fn autostep(tuning: &PlayerTuning) -> CharacterAutostep {
    CharacterAutostep {
        max_height: CharacterLength::Absolute(tuning.step_offset),
        min_width: CharacterLength::Absolute(0.2),
        include_dynamic_bodies: false,
    }
}

/// Spawn the player with its hold anchor.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    tuning: &PlayerTuning,
    vehicle: Option<Entity>,
    seat: Option<Entity>,
) -> Entity {
    let body_material = materials.add(Color::srgb(0.9, 0.55, 0.1));

    let player = commands
        .spawn((
            Player,
            Locomotion::default(),
            InteractionState::default(),
            Animator::new(tuning),
            Transform::from_translation(position),
            Visibility::default(),
            Mesh3d(meshes.add(Capsule3d::new(CAPSULE_RADIUS, CAPSULE_HALF_HEIGHT * 2.0))),
            MeshMaterial3d(body_material.clone()),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                autostep: Some(autostep(tuning)),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(0.3)),
                ..default()
            },
        ))
        .id();

    // Nose so the facing direction is visible
    commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(0.15, 0.15, 0.2))),
            MeshMaterial3d(body_material),
            Transform::from_xyz(0.0, 0.5, -0.3),
        ))
        .set_parent(player);

    let hold_anchor = commands
        .spawn((
            HoldAnchor,
            Transform::from_xyz(0.0, 0.1, -0.6),
            Visibility::default(),
        ))
        .set_parent(player)
        .id();

    commands.entity(player).insert(PlayerLinks {
        hold_anchor,
        vehicle,
        seat,
    });

    player
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::scene::SceneSpawner;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    /// Rapier world with a floor at y = 0 and a spawned player.
    fn physics_app(hz: f64) -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, TransformPlugin, HierarchyPlugin, AssetPlugin::default()));
        // Needed by rapier's async collider systems
        app.init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_resource::<SceneSpawner>();
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / hz,
        )));
        app.insert_resource(GameplayConfig::default());
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_systems(Update, player_locomotion);

        app.world_mut().spawn((
            Transform::from_xyz(0.0, -0.1, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(30.0, 0.1, 30.0),
        ));

        let tuning = PlayerTuning::default();
        let player = app
            .world_mut()
            .run_system_once(
                move |mut commands: Commands,
                      mut meshes: ResMut<Assets<Mesh>>,
                      mut materials: ResMut<Assets<StandardMaterial>>| {
                    spawn_player(
                        &mut commands,
                        &mut meshes,
                        &mut materials,
                        Vec3::new(0.0, 1.0, 0.0),
                        &tuning,
                        None,
                        None,
                    )
                },
            )
            .unwrap();
        (app, player)
    }

    fn feet_height(app: &App, player: Entity) -> f32 {
        app.world().get::<Transform>(player).unwrap().translation.y
            - CAPSULE_HALF_HEIGHT
            - CAPSULE_RADIUS
    }

    fn jump_apex(hz: f64) -> f32 {
        let (mut app, player) = physics_app(hz);
        // Settle on the floor
        for _ in 0..(hz as usize) {
            app.update();
        }
        let rest = feet_height(&app, player);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        app.update();
        {
            let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            input.release_all();
            input.clear();
        }

        let mut apex = rest;
        for _ in 0..(hz as usize) {
            app.update();
            apex = apex.max(feet_height(&app, player));
        }
        apex - rest
    }

    #[test]
    fn jump_reaches_full_height_at_60_hz() {
        // jump_speed 5 under -9.81 peaks near 1.27 m
        let height = jump_apex(60.0);
        assert!(height > 1.0, "jump only reached {height} m");
    }

    #[test]
    fn jump_height_does_not_depend_on_frame_rate() {
        let slow = jump_apex(30.0);
        let fast = jump_apex(144.0);
        assert!((slow - fast).abs() < 0.2, "30 Hz {slow} m vs 144 Hz {fast} m");
    }
}
