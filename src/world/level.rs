//! Level assembly: ground, lights, dumpster, sweeper, player, garbage and cameras.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::{CameraBlend, CameraRig, MainCamera, RigRole};
use crate::core::GameplayConfig;
use crate::items::{Cleanable, Dumpster, Pickable, PickableItem};
use crate::player::spawn_player;
use crate::vehicle::spawn_sweeper;

use super::scatter::scatter_positions;

/// Marker for every root entity that belongs to the current session.
#[derive(Component)]
pub struct LevelEntity;

/// Fixed anchor points of the play area.
#[derive(Debug, Clone, Copy)]
pub struct LevelLayout {
    pub dumpster: Vec3,
    pub sweeper: Vec3,
    pub player: Vec3,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            dumpster: Vec3::new(-6.0, 0.0, -4.0),
            sweeper: Vec3::new(5.0, 0.0, 0.0),
            player: Vec3::new(0.0, 1.0, 4.0),
        }
    }
}

impl LevelLayout {
    /// Zones loose garbage should not be scattered into.
    fn keep_clear(&self) -> [(Vec3, f32); 3] {
        [(self.dumpster, 3.0), (self.sweeper, 3.5), (self.player, 2.0)]
    }
}

const DUMPSTER_HALF_EXTENTS: Vec3 = Vec3::new(1.2, 0.7, 0.8);
const BAG_HALF_EXTENTS: Vec3 = Vec3::new(0.25, 0.3, 0.25);
const RUBBISH_HALF_SIZE: f32 = 0.12;

/// Build a fresh level from the gameplay config.
pub fn build_level(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &GameplayConfig,
    layout: &LevelLayout,
) {
    let half_extent = config.level.area_half_extent;

    setup_environment(commands, meshes, materials, half_extent);
    spawn_dumpster(commands, meshes, materials, layout.dumpster);

    let spawned = spawn_sweeper(commands, meshes, materials, layout.sweeper, &config.vehicle);
    commands.entity(spawned.sweeper).insert(LevelEntity);

    let player = spawn_player(
        commands,
        meshes,
        materials,
        layout.player,
        &config.player,
        Some(spawned.sweeper),
        Some(spawned.seat),
    );
    commands.entity(player).insert(LevelEntity);

    let mut rng = StdRng::seed_from_u64(config.level.seed);
    let keep_clear = layout.keep_clear();

    let bag_mesh = meshes.add(Cuboid::from_size(BAG_HALF_EXTENTS * 2.0));
    let bag_material = materials.add(Color::srgb(0.08, 0.1, 0.08));
    for position in scatter_positions(&mut rng, config.score.total_bags, half_extent, &keep_clear) {
        commands.spawn((
            Name::new("Garbage Bag"),
            Pickable,
            PickableItem::default(),
            Mesh3d(bag_mesh.clone()),
            MeshMaterial3d(bag_material.clone()),
            Transform::from_translation(position + Vec3::Y * BAG_HALF_EXTENTS.y),
            RigidBody::Dynamic,
            Collider::cuboid(BAG_HALF_EXTENTS.x, BAG_HALF_EXTENTS.y, BAG_HALF_EXTENTS.z),
            LevelEntity,
        ));
    }

    let rubbish_mesh = meshes.add(Cuboid::from_length(RUBBISH_HALF_SIZE * 2.0));
    let rubbish_material = materials.add(Color::srgb(0.6, 0.5, 0.35));
    for position in
        scatter_positions(&mut rng, config.score.total_rubbish, half_extent, &keep_clear)
    {
        commands.spawn((
            Name::new("Floor Rubbish"),
            Cleanable,
            Mesh3d(rubbish_mesh.clone()),
            MeshMaterial3d(rubbish_material.clone()),
            Transform::from_translation(position + Vec3::Y * RUBBISH_HALF_SIZE),
            RigidBody::Dynamic,
            Collider::cuboid(RUBBISH_HALF_SIZE, RUBBISH_HALF_SIZE, RUBBISH_HALF_SIZE),
            LevelEntity,
        ));
    }

    spawn_cameras(commands, config, layout, player, spawned.sweeper);

    info!(
        "Level built: {} bags, {} rubbish, {:.0}s on the clock",
        config.score.total_bags, config.score.total_rubbish, config.score.time_limit
    );
}

fn setup_environment(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    half_extent: f32,
) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    // Late afternoon sun
    commands.spawn((
        DirectionalLight {
            color: Color::srgb(1.0, 0.95, 0.85),
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
        LevelEntity,
    ));

    // Street surface; its top face sits at y = 0
    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Cuboid::new(half_extent * 2.0, 0.2, half_extent * 2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.35, 0.38))),
        Transform::from_xyz(0.0, -0.1, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(half_extent, 0.1, half_extent),
        LevelEntity,
    ));
}

fn spawn_dumpster(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
) {
    let half = DUMPSTER_HALF_EXTENTS;
    commands
        .spawn((
            Name::new("Dumpster"),
            Mesh3d(meshes.add(Cuboid::from_size(half * 2.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.15, 0.4, 0.2))),
            Transform::from_translation(position + Vec3::Y * half.y),
            RigidBody::Fixed,
            Collider::cuboid(half.x, half.y, half.z),
            LevelEntity,
        ))
        .with_children(|parent| {
            // Opening on top; bags dropped over it fall through the trigger
            parent.spawn((
                Dumpster,
                Transform::from_xyz(0.0, half.y + 0.4, 0.0),
                Collider::cuboid(half.x, 0.4, half.z),
                Sensor,
                ActiveEvents::COLLISION_EVENTS,
            ));
        });
}

fn spawn_cameras(
    commands: &mut Commands,
    config: &GameplayConfig,
    layout: &LevelLayout,
    player: Entity,
    sweeper: Entity,
) {
    let player_rig = CameraRig::new(RigRole::Player, Some(player), config.camera.player_distance, 1.2);
    let start = player_rig.pose(layout.player);

    commands.spawn((Name::new("Player Rig"), player_rig, LevelEntity));
    commands.spawn((
        Name::new("Sweeper Rig"),
        CameraRig::new(
            RigRole::Vehicle,
            Some(sweeper),
            config.camera.vehicle_distance,
            1.5,
        ),
        LevelEntity,
    ));

    commands.spawn((
        Camera3d::default(),
        MainCamera,
        CameraBlend {
            speed: config.camera.blend_speed,
        },
        start,
        LevelEntity,
    ));
}
