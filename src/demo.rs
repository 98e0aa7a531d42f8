use std::f32::consts::{PI, TAU};

use avian3d::prelude::*;
use bevy::light::CascadeShadowConfigBuilder;
use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use bevy_inspector_egui::{bevy_egui::EguiPlugin, quick::WorldInspectorPlugin};
use bevy_tnua::prelude::*;
use bevy_tnua_avian3d::prelude::*;

use crate::camera::*;

/// Settings file read from the working directory at startup.
pub const SETTINGS_PATH: &str = "camera.toml";

#[derive(PhysicsLayer, Default, Clone, Copy, Debug)]
pub enum GameLayer {
    #[default]
    Default,
    Player,
    Obstacle,
}

#[derive(Component, Default)]
#[require(Transform, InheritedVisibility)]
pub struct DemoPlayer;

/// Small scene to walk around in with the orbit camera.
pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PhysicsPlugins::default());
        app.insert_resource(Gravity(Vec3::NEG_Y * 9.0));
        app.add_plugins(TnuaControllerPlugin::new(FixedUpdate));
        app.add_plugins(TnuaAvian3dPlugin::new(FixedUpdate));

        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_plugins(EguiPlugin::default());
            app.add_plugins(WorldInspectorPlugin::new());
        }

        app.add_plugins(OrbitCameraPlugin);
        app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.08)));
        app.add_systems(Startup, setup);
        app.add_systems(Update, (apply_controls, toggle_pause));
    }
}

/// Camera settings from [`SETTINGS_PATH`], or the demo defaults.
pub fn load_camera_settings() -> OrbitCameraSettings {
    match OrbitCameraSettings::load(SETTINGS_PATH) {
        Ok(settings) => {
            info!("loaded camera settings from {SETTINGS_PATH}");
            settings
        }
        Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            demo_camera_settings()
        }
        Err(err) => {
            warn!("{err}, falling back to defaults");
            demo_camera_settings()
        }
    }
}

fn demo_camera_settings() -> OrbitCameraSettings {
    OrbitCameraSettings {
        // the ray starts inside the player capsule, so only obstacles count
        obstacle_layers: GameLayer::Obstacle.into(),
        ..default()
    }
}

fn obstacle_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Obstacle, LayerMask::ALL)
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ambient_light: ResMut<AmbientLight>,
) {
    ambient_light.brightness = 100.0;

    commands.spawn((
        DirectionalLight {
            illuminance: light_consts::lux::OVERCAST_DAY,
            shadows_enabled: true,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, 2.0, 0.0),
            rotation: Quat::from_rotation_x(-PI / 4.),
            ..default()
        },
        CascadeShadowConfigBuilder {
            first_cascade_far_bound: 4.0,
            maximum_distance: 100.0,
            ..default()
        }
        .build(),
    ));

    // floor
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(30.0, 0.1, 30.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.4, 0.35),
            perceptual_roughness: 1.0,
            ..default()
        })),
        RigidBody::Static,
        Collider::cuboid(30.0, 0.1, 30.0),
        obstacle_layers(),
        Name::new("Floor"),
    ));

    // ring of pillars to hide behind
    let pillar_mesh = meshes.add(Cuboid::new(1.0, 3.0, 1.0));
    let pillar_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.5, 0.45),
        perceptual_roughness: 0.9,
        ..default()
    });
    for i in 0..8 {
        let angle = i as f32 / 8.0 * TAU + rand::random::<f32>() * 0.3;
        let radius = 4.0 + rand::random::<f32>() * 2.0;
        commands.spawn((
            Mesh3d(pillar_mesh.clone()),
            MeshMaterial3d(pillar_material.clone()),
            Transform::from_xyz(angle.cos() * radius, 1.5, angle.sin() * radius),
            RigidBody::Static,
            Collider::cuboid(1.0, 3.0, 1.0),
            obstacle_layers(),
            Name::new("Pillar"),
        ));
    }

    let player = commands
        .spawn((
            DemoPlayer,
            Mesh3d(meshes.add(Capsule3d::new(0.3, 1.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.8, 0.3, 0.2),
                ..default()
            })),
            // Capsule: radius 0.3, height 1.0 -> center sits 0.8 above the ground
            Transform::from_xyz(0.0, 0.85, 0.0),
            RigidBody::Dynamic,
            Collider::capsule(0.3, 1.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Default, GameLayer::Obstacle]),
            TnuaController::default(),
            TnuaAvian3dSensorShape(Collider::cylinder(0.29, 0.0)),
            Name::new("Player"),
        ))
        .id();

    commands.spawn((
        Camera3d::default(),
        OrbitCollisionCamera::default(),
        load_camera_settings(),
        OrbitCameraTarget(player),
        Name::new("Orbit Camera"),
    ));
}

/// WASD relative to where the camera is looking.
fn apply_controls(
    keyboard: Res<ButtonInput<KeyCode>>,
    camera: Single<&Transform, With<OrbitCollisionCamera>>,
    mut controller_query: Query<&mut TnuaController, With<DemoPlayer>>,
) {
    let Ok(mut controller) = controller_query.single_mut() else {
        return;
    };

    let forward = camera.forward().as_vec3().with_y(0.0).normalize_or_zero();
    let sideways = camera.right().as_vec3().with_y(0.0).normalize_or_zero();
    const SPEED: f32 = 2.0;

    let sprint_factor = if keyboard.pressed(KeyCode::ShiftLeft) {
        1.8
    } else {
        1.0
    };

    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction += forward;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction -= forward;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += sideways;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction -= sideways;
    }

    // The basis has to be fed every frame, otherwise the character just falls
    controller.basis(TnuaBuiltinWalk {
        desired_velocity: direction.normalize_or_zero() * SPEED * sprint_factor,
        float_height: 0.85,
        ..Default::default()
    });
}

fn toggle_pause(keyboard: Res<ButtonInput<KeyCode>>, mut paused: ResMut<CameraPaused>) {
    if keyboard.just_pressed(KeyCode::KeyP) {
        paused.0 = !paused.0;
        info!("orbit camera {}", if paused.0 { "paused" } else { "resumed" });
    }
}
