//! Pickup/drop and vehicle entry/exit.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::GameplayConfig;
use crate::items::Pickable;
use crate::vehicle::{DriveControl, Seat, Sweeper};

use super::animator::{AnimState, AnimationEvent, AnimationEventKind, Animator};
use super::components::{InteractionState, Player, PlayerLinks};

/// Whether the interact key should start a pickup.
pub fn can_start_pickup(
    state: &InteractionState,
    player_pos: Vec3,
    candidate_pos: Option<Vec3>,
    pickup_range: f32,
) -> bool {
    state.held_object.is_none()
        && candidate_pos.is_some_and(|pos| player_pos.distance(pos) <= pickup_range)
}

/// Sit down: the player and the vehicle flip to driving together.
pub fn board(state: &mut InteractionState, animator: &mut Animator, vehicle: &mut impl DriveControl) {
    animator.reset_to_idle();
    vehicle.start_driving();
    state.is_driving = true;
    animator.is_driving = true;
}

/// Get out: the vehicle stops taking input and the player walks again.
pub fn leave<V: DriveControl>(
    state: &mut InteractionState,
    animator: &mut Animator,
    vehicle: Option<&mut V>,
) {
    if let Some(vehicle) = vehicle {
        vehicle.stop_driving();
    }
    state.is_driving = false;
    animator.is_driving = false;
}

/// Drop pitch and roll from `rotation`, keeping its heading.
pub fn upright(rotation: Quat) -> Quat {
    let forward = rotation * Vec3::NEG_Z;
    let flat = Vec3::new(forward.x, 0.0, forward.z);
    if flat.length_squared() > 1e-6 {
        Transform::IDENTITY.looking_to(flat, Vec3::Y).rotation
    } else {
        // Facing straight up or down; fall back to the euler yaw
        Quat::from_rotation_y(rotation.to_euler(EulerRot::YXZ).0)
    }
}

/// Remember the last pickable item the character controller bumped into.
///
/// The candidate is not cleared when contact ends; range is checked again
/// when the interact key is pressed.
pub fn track_pickup_candidate(
    mut players: Query<(&KinematicCharacterControllerOutput, &mut InteractionState), With<Player>>,
    pickables: Query<(), With<Pickable>>,
) {
    for (output, mut state) in players.iter_mut() {
        for collision in &output.collisions {
            if !pickables.contains(collision.entity) {
                continue;
            }
            if state.pickup_candidate != Some(collision.entity) {
                debug!("Collided with pickable {:?}", collision.entity);
                state.pickup_candidate = Some(collision.entity);
            }
        }
    }
}

/// Handle the interact (E) and vehicle (F) keys.
pub fn player_interaction(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<GameplayConfig>,
    mut players: Query<
        (
            Entity,
            &GlobalTransform,
            &mut Transform,
            &mut InteractionState,
            &mut Animator,
            &PlayerLinks,
        ),
        With<Player>,
    >,
    mut vehicles: Query<(&GlobalTransform, &mut Sweeper), Without<Player>>,
    seats: Query<&Transform, (With<Seat>, Without<Player>)>,
    items: Query<&GlobalTransform, (With<Pickable>, Without<Player>)>,
) {
    let tuning = &config.player;

    for (entity, global, mut transform, mut state, mut animator, links) in players.iter_mut() {
        let player_pos = global.translation();

        if keyboard.just_pressed(KeyCode::KeyE) && !state.is_driving {
            let candidate_pos = state
                .pickup_candidate
                .and_then(|candidate| items.get(candidate).ok())
                .map(GlobalTransform::translation);

            if can_start_pickup(&state, player_pos, candidate_pos, tuning.pickup_range) {
                info!("Preparing to pick up {:?}", state.pickup_candidate);
                animator.is_picking = true;
            } else if let Some(held) = state.held_object.take() {
                drop_object(&mut commands, held, items.contains(held));
            }
        }

        if keyboard.just_pressed(KeyCode::KeyF) {
            if state.is_driving {
                info!("Exiting vehicle");
                // Keep the seat's world position but stand up straight
                let mut pose = global.compute_transform();
                pose.rotation = upright(pose.rotation);
                pose.scale = Vec3::ONE;
                *transform = pose;
                commands
                    .entity(entity)
                    .remove_parent()
                    .remove::<(RigidBodyDisabled, ColliderDisabled)>();
                let vehicle = links
                    .vehicle
                    .and_then(|vehicle| vehicles.get_mut(vehicle).ok())
                    .map(|(_, sweeper)| sweeper);
                match vehicle {
                    Some(mut sweeper) => leave(&mut state, &mut animator, Some(&mut *sweeper)),
                    None => leave::<Sweeper>(&mut state, &mut animator, None),
                }
            } else if let Some(vehicle) = links.vehicle {
                let Ok((vehicle_global, mut sweeper)) = vehicles.get_mut(vehicle) else {
                    warn!("Linked vehicle {:?} no longer exists", vehicle);
                    continue;
                };
                if player_pos.distance(vehicle_global.translation()) > tuning.enter_range {
                    continue;
                }
                let Some(seat) = links.seat.and_then(|seat| seats.get(seat).ok()) else {
                    error!("Seat anchor is not assigned!");
                    continue;
                };

                info!("Entering vehicle");
                // Seat is a direct child of the vehicle, so its local pose is ours
                *transform = *seat;
                commands
                    .entity(entity)
                    .insert((RigidBodyDisabled, ColliderDisabled))
                    .set_parent(vehicle);
                board(&mut state, &mut animator, &mut *sweeper);
            }
        }

        // The pickup clip has started; the request is consumed
        if animator.is_state(AnimState::PickUp) {
            animator.is_picking = false;
        }
    }
}

/// Attach the pickup candidate when the pickup clip reaches the item.
pub fn attach_object(
    mut commands: Commands,
    mut events: EventReader<AnimationEvent>,
    mut players: Query<(&mut InteractionState, &PlayerLinks), With<Player>>,
    items: Query<(), With<Pickable>>,
) {
    for event in events.read() {
        if event.kind != AnimationEventKind::AttachObject {
            continue;
        }
        let Ok((mut state, links)) = players.get_mut(event.entity) else {
            continue;
        };
        let Some(item) = state.pickup_candidate.take() else {
            continue;
        };
        if !items.contains(item) {
            debug!("Pickup candidate {:?} is gone", item);
            continue;
        }

        info!("Picking up {:?}", item);
        commands
            .entity(item)
            .insert((
                RigidBody::KinematicPositionBased,
                ColliderDisabled,
                Transform::IDENTITY,
            ))
            .set_parent(links.hold_anchor);
        state.held_object = Some(item);
    }
}

fn drop_object(commands: &mut Commands, item: Entity, exists: bool) {
    if !exists {
        return;
    }
    commands
        .entity(item)
        .remove_parent_in_place()
        .insert(RigidBody::Dynamic)
        .remove::<ColliderDisabled>();
}
