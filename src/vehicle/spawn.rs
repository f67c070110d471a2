//! Sweeper assembly: chassis, wheels, brushes, seat and cleaning zone.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::VehicleTuning;

use super::components::*;

/// Entities of a spawned sweeper the rest of the level needs.
pub struct SpawnedSweeper {
    pub sweeper: Entity,
    pub seat: Entity,
}

const CHASSIS_HALF_EXTENTS: Vec3 = Vec3::new(0.8, 0.6, 1.5);

/// Wheel mounts in authoring order, relative to the chassis centre.
const WHEEL_MOUNTS: [(Axel, Vec3); 4] = [
    (Axel::Front, Vec3::new(-0.95, -0.25, -1.0)),
    (Axel::Front, Vec3::new(0.95, -0.25, -1.0)),
    (Axel::Rear, Vec3::new(-0.95, -0.25, 1.0)),
    (Axel::Rear, Vec3::new(0.95, -0.25, 1.0)),
];

/// Brushes sit under the front corners; left first.
const BRUSH_MOUNTS: [Vec3; 2] = [Vec3::new(-0.7, -0.57, -1.55), Vec3::new(0.7, -0.57, -1.55)];

/// Spawn a sweeper resting at `position`.
pub fn spawn_sweeper(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    tuning: &VehicleTuning,
) -> SpawnedSweeper {
    let (cx, cy, cz) = tuning.center_of_mass;
    let half = CHASSIS_HALF_EXTENTS;
    // Solid box inertia about the centre
    let inertia = Vec3::new(
        tuning.mass * (half.y * half.y + half.z * half.z) / 3.0,
        tuning.mass * (half.x * half.x + half.z * half.z) / 3.0,
        tuning.mass * (half.x * half.x + half.y * half.y) / 3.0,
    );

    let sweeper = commands
        .spawn((
            Name::new("Sweeper"),
            Transform::from_translation(position + Vec3::Y * half.y),
            Visibility::default(),
            Mesh3d(meshes.add(Cuboid::from_size(half * 2.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.95, 0.85, 0.2))),
            RigidBody::Dynamic,
            Collider::cuboid(half.x, half.y, half.z),
            ColliderMassProperties::MassProperties(MassProperties {
                local_center_of_mass: Vec3::new(cx, cy, cz),
                mass: tuning.mass,
                principal_inertia_local_frame: Quat::IDENTITY,
                principal_inertia: inertia,
            }),
            // Traction comes from the wheel solver only
            Friction {
                coefficient: 0.0,
                combine_rule: CoefficientCombineRule::Min,
            },
            Velocity::default(),
            ExternalForce::default(),
            Damping {
                linear_damping: 0.2,
                angular_damping: 1.0,
            },
        ))
        .id();

    let wheel_mesh = meshes.add(Cylinder::new(tuning.wheel_radius, 0.25));
    let wheel_material = materials.add(Color::srgb(0.1, 0.1, 0.1));
    let mut wheels = Vec::with_capacity(WHEEL_MOUNTS.len());
    for (axel, mount) in WHEEL_MOUNTS {
        let wheel = commands
            .spawn((
                Transform::from_translation(mount),
                Visibility::default(),
            ))
            .set_parent(sweeper)
            .id();
        let model = commands
            .spawn((
                Mesh3d(wheel_mesh.clone()),
                MeshMaterial3d(wheel_material.clone()),
                Transform::from_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
            ))
            .set_parent(wheel)
            .id();
        commands.entity(wheel).insert(Wheel {
            model: Some(model),
            ..Wheel::new(axel, tuning.wheel_radius)
        });
        wheels.push(wheel);
    }

    let brush_mesh = meshes.add(Cylinder::new(0.35, 0.05));
    let brush_material = materials.add(Color::srgb(0.3, 0.2, 0.15));
    let brushes = BRUSH_MOUNTS
        .iter()
        .map(|mount| {
            commands
                .spawn((
                    Brush {
                        rotation_speed: 360.0,
                    },
                    Mesh3d(brush_mesh.clone()),
                    MeshMaterial3d(brush_material.clone()),
                    Transform::from_translation(*mount),
                ))
                .set_parent(sweeper)
                .id()
        })
        .collect();

    let seat = commands
        .spawn((
            Seat,
            Transform::from_xyz(0.0, half.y + 0.9, 0.3),
            Visibility::default(),
        ))
        .set_parent(sweeper)
        .id();

    commands
        .spawn((
            CleaningZone { sweeper },
            Transform::from_xyz(0.0, -0.3, -half.z - 0.3),
            Collider::cuboid(1.1, 0.35, 0.5),
            Sensor,
            ColliderMassProperties::Density(0.0),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .set_parent(sweeper);

    commands.entity(sweeper).insert(Sweeper {
        wheels,
        brushes,
        ..default()
    });

    SpawnedSweeper { sweeper, seat }
}
