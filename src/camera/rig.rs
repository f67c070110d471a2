//! Follow-camera rigs and the priority switch between them.
//!
//! Each rig orbits a target. The main camera blends toward whichever rig
//! currently has the highest priority, so switching priorities is all it
//! takes to change views.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use crate::core::GameplayConfig;
use crate::player::{InteractionState, Player};

/// Priority of the live rig.
pub const ACTIVE_PRIORITY: i32 = 10;
/// Priority of every other rig.
pub const INACTIVE_PRIORITY: i32 = 0;

/// Marker for the single rendering camera.
#[derive(Component)]
pub struct MainCamera;

/// Which view a rig provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigRole {
    /// Follows the player on foot
    Player,
    /// Follows the sweeper while driving
    Vehicle,
}

/// An orbiting follow rig.
#[derive(Component, Debug, Clone)]
pub struct CameraRig {
    pub role: RigRole,
    pub target: Option<Entity>,
    pub priority: i32,
    /// Radians around the target
    pub yaw: f32,
    /// Radians, negative looks down
    pub pitch: f32,
    pub distance: f32,
    /// Height of the look-at point above the target origin
    pub height: f32,
}

impl CameraRig {
    pub fn new(role: RigRole, target: Option<Entity>, distance: f32, height: f32) -> Self {
        Self {
            role,
            target,
            priority: INACTIVE_PRIORITY,
            yaw: 0.0,
            pitch: -0.35,
            distance,
            height,
        }
    }

    /// Camera pose for a target at `target_pos`.
    pub fn pose(&self, target_pos: Vec3) -> Transform {
        let focus = target_pos + Vec3::Y * self.height;
        let orbit = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        let eye = focus + orbit * Vec3::new(0.0, 0.0, self.distance);
        Transform::from_translation(eye).looking_at(focus, Vec3::Y)
    }
}

/// Smooth approach of the main camera toward the live rig.
#[derive(Component, Debug)]
pub struct CameraBlend {
    /// Higher is snappier
    pub speed: f32,
}

impl CameraBlend {
    /// Fraction of the remaining distance to cover this frame.
    pub fn factor(&self, dt: f32) -> f32 {
        1.0 - (-self.speed * dt).exp()
    }
}

/// Priority a rig should have for the given driving state.
pub fn rig_priority(role: RigRole, is_driving: bool) -> i32 {
    let live = match role {
        RigRole::Player => !is_driving,
        RigRole::Vehicle => is_driving,
    };
    if live {
        ACTIVE_PRIORITY
    } else {
        INACTIVE_PRIORITY
    }
}

/// Raise the vehicle rig while driving, the player rig otherwise.
pub fn switch_camera_priority(
    players: Query<&InteractionState, With<Player>>,
    mut rigs: Query<&mut CameraRig>,
) {
    let Ok(state) = players.get_single() else {
        return;
    };
    for mut rig in rigs.iter_mut() {
        let priority = rig_priority(rig.role, state.is_driving);
        if rig.priority != priority {
            rig.priority = priority;
        }
    }
}

/// Mouse motion orbits the live rig.
pub fn orbit_live_rig(
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<GameplayConfig>,
    time: Res<Time<Virtual>>,
    mut rigs: Query<&mut CameraRig>,
) {
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }
    // Cursor is free over the end panel
    if delta == Vec2::ZERO || time.is_paused() {
        return;
    }

    let Some(mut rig) = rigs.iter_mut().max_by_key(|rig| rig.priority) else {
        return;
    };
    let sensitivity = config.camera.mouse_sensitivity * 0.002;
    let y_invert = if config.camera.invert_y { -1.0 } else { 1.0 };

    rig.yaw -= delta.x * sensitivity;
    rig.pitch = (rig.pitch - delta.y * sensitivity * y_invert).clamp(-1.3, 0.4);
}

/// Move the main camera toward the live rig's pose.
pub fn drive_main_camera(
    time: Res<Time<Real>>,
    rigs: Query<&CameraRig>,
    targets: Query<&GlobalTransform, Without<MainCamera>>,
    mut cameras: Query<(&mut Transform, &mut GlobalTransform, &CameraBlend), With<MainCamera>>,
) {
    let Some(rig) = rigs.iter().max_by_key(|rig| rig.priority) else {
        return;
    };
    let Some(target_pos) = rig
        .target
        .and_then(|target| targets.get(target).ok())
        .map(GlobalTransform::translation)
    else {
        return;
    };
    let goal = rig.pose(target_pos);

    for (mut transform, mut global, blend) in cameras.iter_mut() {
        let t = blend.factor(time.delta_secs());
        transform.translation = transform.translation.lerp(goal.translation, t);
        transform.rotation = transform.rotation.slerp(goal.rotation, t);
        // Runs after propagation; the main camera is a root entity
        *global = GlobalTransform::from(*transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_follow_driving_state() {
        assert_eq!(rig_priority(RigRole::Player, false), ACTIVE_PRIORITY);
        assert_eq!(rig_priority(RigRole::Vehicle, false), INACTIVE_PRIORITY);
        assert_eq!(rig_priority(RigRole::Player, true), INACTIVE_PRIORITY);
        assert_eq!(rig_priority(RigRole::Vehicle, true), ACTIVE_PRIORITY);
    }

    #[test]
    fn switcher_flips_rigs_when_driving() {
        let mut app = App::new();
        app.add_systems(Update, switch_camera_priority);
        let player_rig = app
            .world_mut()
            .spawn(CameraRig::new(RigRole::Player, None, 5.0, 1.0))
            .id();
        let vehicle_rig = app
            .world_mut()
            .spawn(CameraRig::new(RigRole::Vehicle, None, 9.0, 1.5))
            .id();
        let player = app
            .world_mut()
            .spawn((Player, InteractionState::default()))
            .id();

        app.update();
        assert_eq!(app.world().get::<CameraRig>(player_rig).unwrap().priority, 10);
        assert_eq!(app.world().get::<CameraRig>(vehicle_rig).unwrap().priority, 0);

        app.world_mut()
            .get_mut::<InteractionState>(player)
            .unwrap()
            .is_driving = true;
        app.update();
        assert_eq!(app.world().get::<CameraRig>(player_rig).unwrap().priority, 0);
        assert_eq!(app.world().get::<CameraRig>(vehicle_rig).unwrap().priority, 10);
    }

    #[test]
    fn rig_pose_looks_at_focus() {
        let rig = CameraRig::new(RigRole::Player, None, 5.0, 1.0);
        let pose = rig.pose(Vec3::ZERO);
        let focus = Vec3::Y;
        assert!((pose.translation.distance(focus) - 5.0).abs() < 1e-4);
        let to_focus = (focus - pose.translation).normalize();
        assert!((pose.forward().as_vec3() - to_focus).length() < 1e-4);
    }

    #[test]
    fn blend_factor_is_bounded() {
        let blend = CameraBlend { speed: 6.0 };
        assert_eq!(blend.factor(0.0), 0.0);
        let f = blend.factor(0.016);
        assert!(f > 0.0 && f < 1.0);
        assert!(blend.factor(10.0) > 0.99);
    }
}
