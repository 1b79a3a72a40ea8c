//! Zoo Viewer - Bevy-based 3D rendering of the animal park

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::pbr::light_consts::lux::AMBIENT_DAYLIGHT;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use bevy::window::PrimaryWindow;
use zoo_core::components::{Color as ZooColor, Creature, Species, Vec3 as ZooVec3};
use zoo_core::config::ZooConfig;
use zoo_core::engine::ZooEngine;
use zoo_core::environment::Lighting;
use zoo_core::models::{Model, Part, Shape};
use zoo_core::picking::{Camera as ZooCamera, Viewport};

fn main() {
    let config = load_config();

    let engine = match ZooEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Failed to build zoo: {}", e);
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Zoo - 3D Animal Park".to_string(),
                resolution: (1280.0, 720.0).into(),
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(bevy::diagnostic::FrameTimeDiagnosticsPlugin::default())
        .add_plugins(bevy::diagnostic::LogDiagnosticsPlugin::default())
        .insert_resource(ZooWrapper(engine))
        .insert_resource(OrbitState::default())
        .insert_resource(ClearColor(Color::BLACK))
        .add_systems(Startup, (setup, spawn_scenery, spawn_creatures, setup_ui))
        .add_systems(
            Update,
            (
                update_zoo,
                keyboard_controls,
                camera_controls,
                handle_click,
                sync_creatures,
                apply_lighting,
                render_selection,
                update_text_ui,
            ),
        )
        .run();
}

/// Config from the first CLI argument, or the built-in park
fn load_config() -> ZooConfig {
    let Some(path) = std::env::args().nth(1) else {
        return ZooConfig::default();
    };

    match ZooConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

#[derive(Resource)]
struct ZooWrapper(ZooEngine);

/// Spherical coordinates of the camera around the origin
#[derive(Resource)]
struct OrbitState {
    radius: f32,
    azimuth: f32,
    /// Angle down from straight up
    polar: f32,
}

impl OrbitState {
    const MIN_RADIUS: f32 = 10.0;
    const MAX_RADIUS: f32 = 200.0;

    fn from_position(position: Vec3) -> Self {
        let radius = position.length();
        Self {
            radius,
            azimuth: position.x.atan2(position.z),
            polar: (position.y / radius).acos(),
        }
    }

    fn position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.polar.sin() * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * self.polar.sin() * self.azimuth.cos(),
        )
    }
}

impl Default for OrbitState {
    fn default() -> Self {
        Self::from_position(to_bevy(ZooCamera::HOME_POSITION))
    }
}

// Marker components
#[derive(Component)]
struct MainCamera;

#[derive(Component)]
struct Sun;

#[derive(Component)]
struct Moon;

#[derive(Component)]
struct StatsText;

#[derive(Component)]
struct InfoText;

#[derive(Component)]
struct ControlsText;

/// Root of the meshes drawn for one core creature
#[derive(Component)]
struct CreatureLink(hecs::Entity);

fn to_bevy(v: ZooVec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn to_zoo(v: Vec3) -> ZooVec3 {
    ZooVec3::new(v.x, v.y, v.z)
}

fn bevy_color(color: ZooColor) -> Color {
    let [r, g, b] = color.rgb();
    Color::srgb(r, g, b)
}

fn setup(mut commands: Commands, zoo: Res<ZooWrapper>, window_query: Query<&Window, With<PrimaryWindow>>) {
    let aspect = window_query
        .get_single()
        .map(|w| w.width() / w.height().max(1.0))
        .unwrap_or(16.0 / 9.0);
    let home = zoo.0.reset_camera(aspect);
    let lighting = zoo.0.lighting();

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: home.fov_y_degrees.to_radians(),
            near: home.near,
            far: home.far,
            ..default()
        }),
        Transform::from_translation(to_bevy(home.position)).looking_at(to_bevy(home.target), Vec3::Y),
        DistanceFog {
            color: bevy_color(lighting.fog.color),
            falloff: FogFalloff::Linear {
                start: lighting.fog.start,
                end: lighting.fog.end,
            },
            ..default()
        },
        MainCamera,
    ));

    // Sun and moon, only one visible at a time
    commands.spawn((
        DirectionalLight {
            color: bevy_color(lighting.sun.color),
            illuminance: lighting.sun.intensity * AMBIENT_DAYLIGHT,
            shadows_enabled: lighting.sun.casts_shadows,
            ..default()
        },
        Transform::from_translation(to_bevy(lighting.sun.position)).looking_at(Vec3::ZERO, Vec3::Y),
        Visibility::Visible,
        Sun,
    ));
    commands.spawn((
        DirectionalLight {
            color: bevy_color(lighting.moon.color),
            illuminance: lighting.moon.intensity * AMBIENT_DAYLIGHT,
            shadows_enabled: lighting.moon.casts_shadows,
            ..default()
        },
        Transform::from_translation(to_bevy(lighting.moon.position)).looking_at(Vec3::ZERO, Vec3::Y),
        Visibility::Hidden,
        Moon,
    ));

    info!(
        "Zoo ready: {} animals, {} props, {} visitors",
        zoo.0.animal_count(),
        zoo.0.scenery.props.len(),
        zoo.0.visitor_count()
    );
}

/// Mesh for one primitive shape
fn shape_mesh(shape: Shape) -> Mesh {
    match shape {
        Shape::Capsule { radius, length } => Capsule3d::new(radius, length).into(),
        Shape::Sphere { radius } => Sphere::new(radius).mesh().uv(32, 18),
        Shape::Cylinder {
            radius_top,
            radius_bottom,
            height,
        } => ConicalFrustum {
            radius_top,
            radius_bottom,
            height,
        }
        .into(),
        Shape::Cuboid { width, height, depth } => Cuboid::new(width, height, depth).into(),
        // Low-poly sphere reads as a faceted rock
        Shape::Dodecahedron { radius } => Sphere::new(radius).mesh().uv(6, 4),
        Shape::Plane { width, depth } => Plane3d::default().mesh().size(width, depth).into(),
    }
}

fn part_material(part: &Part) -> StandardMaterial {
    let [r, g, b] = part.color.rgb();
    StandardMaterial {
        base_color: Color::srgba(r, g, b, part.opacity),
        alpha_mode: if part.is_transparent() {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        perceptual_roughness: 0.8,
        ..default()
    }
}

fn part_transform(part: &Part) -> Transform {
    Transform::from_translation(to_bevy(part.offset))
        .with_rotation(Quat::from_euler(
            EulerRot::XYZ,
            part.rotation.x,
            part.rotation.y,
            part.rotation.z,
        ))
        .with_scale(to_bevy(part.scale))
}

/// Spawn every part of a model as a child of `root`
fn spawn_model(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    root: Entity,
    model: &Model,
) {
    commands.entity(root).with_children(|parent| {
        for part in &model.parts {
            parent.spawn((
                Mesh3d(meshes.add(shape_mesh(part.shape))),
                MeshMaterial3d(materials.add(part_material(part))),
                part_transform(part),
            ));
        }
    });
}

fn spawn_scenery(
    mut commands: Commands,
    zoo: Res<ZooWrapper>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for prop in &zoo.0.scenery.props {
        let root = commands
            .spawn((
                Transform::from_translation(to_bevy(prop.position)),
                Visibility::default(),
            ))
            .id();
        spawn_model(&mut commands, &mut meshes, &mut materials, root, &prop.model);
    }
}

fn spawn_creatures(
    mut commands: Commands,
    zoo: Res<ZooWrapper>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, creature) in zoo.0.creatures().iter() {
        let root = commands
            .spawn((
                creature_transform(creature),
                Visibility::default(),
                CreatureLink(entity),
            ))
            .id();
        spawn_model(&mut commands, &mut meshes, &mut materials, root, &creature.model);
    }
}

fn creature_transform(creature: &Creature) -> Transform {
    Transform::from_translation(to_bevy(creature.position)).with_rotation(Quat::from_rotation_y(creature.yaw))
}

fn setup_ui(mut commands: Commands) {
    // Stats (top-left)
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        },
        StatsText,
    ));

    // Info panel (right side)
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.95, 0.85)),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(10.0),
            top: Val::Px(10.0),
            max_width: Val::Px(320.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        InfoText,
    ));

    // Control hints (bottom-left)
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(0.8, 0.8, 0.8, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            bottom: Val::Px(10.0),
            ..default()
        },
        ControlsText,
    ));
}

fn update_zoo(time: Res<Time>, mut zoo: ResMut<ZooWrapper>) {
    zoo.0.update(time.delta_secs());
}

fn keyboard_controls(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut zoo: ResMut<ZooWrapper>,
    mut orbit: ResMut<OrbitState>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        zoo.0.toggle_animations();
    }
    if keyboard.just_pressed(KeyCode::KeyN) {
        zoo.0.toggle_day_night();
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        let home = zoo.0.reset_camera(1.0);
        *orbit = OrbitState::from_position(to_bevy(home.position));
    }
    if keyboard.just_pressed(KeyCode::KeyV) {
        let visitors = zoo.0.refresh_visitors();
        info!("Visitor count now {}", visitors);
    }
}

fn camera_controls(
    mut orbit: ResMut<OrbitState>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut scroll_events: EventReader<MouseWheel>,
    mut motion_events: EventReader<MouseMotion>,
) {
    let rotate_speed = 0.005;
    let zoom_speed = 0.1;

    // Right-drag orbits
    if mouse_buttons.pressed(MouseButton::Right) {
        for motion in motion_events.read() {
            orbit.azimuth -= motion.delta.x * rotate_speed;
            orbit.polar -= motion.delta.y * rotate_speed;
        }
    } else {
        motion_events.clear();
    }
    // Never below the ground plane
    orbit.polar = orbit.polar.clamp(0.01, std::f32::consts::FRAC_PI_2);

    for scroll in scroll_events.read() {
        orbit.radius *= 1.0 - scroll.y * zoom_speed;
    }
    orbit.radius = orbit.radius.clamp(OrbitState::MIN_RADIUS, OrbitState::MAX_RADIUS);

    if let Ok(mut transform) = camera_query.get_single_mut() {
        *transform = Transform::from_translation(orbit.position()).looking_at(Vec3::ZERO, Vec3::Y);
    }
}

fn handle_click(
    mut zoo: ResMut<ZooWrapper>,
    camera_query: Query<(&GlobalTransform, &Projection), With<MainCamera>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = window_query.get_single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera_transform, projection)) = camera_query.get_single() else {
        return;
    };

    let viewport = Viewport::new(window.width(), window.height());
    let mut camera = ZooCamera::home(viewport.aspect());
    camera.position = to_zoo(camera_transform.translation());
    camera.target = to_zoo(camera_transform.translation() + *camera_transform.forward());
    camera.up = to_zoo(*camera_transform.up());
    if let Projection::Perspective(perspective) = projection {
        camera.fov_y_degrees = perspective.fov.to_degrees();
        camera = camera.with_clip(perspective.near, perspective.far);
    }

    match zoo.0.click(cursor_pos.x, cursor_pos.y, viewport, &camera) {
        Some(_) => {
            if let Some(creature) = zoo.0.selected_creature() {
                info!("Selected {} {}", creature.glyph, creature.species);
            }
        }
        None => debug!("Click hit nothing"),
    }
}

fn sync_creatures(zoo: Res<ZooWrapper>, mut query: Query<(&CreatureLink, &mut Transform)>) {
    for (link, mut transform) in &mut query {
        let Ok(creature) = zoo.0.world.get::<&Creature>(link.0) else {
            continue;
        };
        *transform = creature_transform(&creature);
    }
}

fn apply_lighting(
    zoo: Res<ZooWrapper>,
    mut clear_color: ResMut<ClearColor>,
    mut ambient: ResMut<AmbientLight>,
    mut fog_query: Query<&mut DistanceFog, With<MainCamera>>,
    mut sun_query: Query<&mut Visibility, (With<Sun>, Without<Moon>)>,
    mut moon_query: Query<&mut Visibility, (With<Moon>, Without<Sun>)>,
) {
    let lighting: Lighting = zoo.0.lighting();
    let sky = bevy_color(lighting.sky);
    if clear_color.0 == sky {
        return;
    }

    clear_color.0 = sky;
    ambient.color = bevy_color(lighting.ambient_color);
    ambient.brightness = lighting.ambient_intensity * 500.0;

    if let Ok(mut fog) = fog_query.get_single_mut() {
        fog.color = bevy_color(lighting.fog.color);
    }

    let visibility = |visible: bool| {
        if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    };
    for mut v in &mut sun_query {
        *v = visibility(lighting.sun.visible);
    }
    for mut v in &mut moon_query {
        *v = visibility(lighting.moon.visible);
    }

    info!("Lighting set for {:?}", zoo.0.day_phase());
}

/// Ring on the ground around the selected animal
fn render_selection(zoo: Res<ZooWrapper>, mut gizmos: Gizmos) {
    let Some(creature) = zoo.0.selected_creature() else {
        return;
    };

    let bounds = creature.world_bounds();
    let center = Vec3::new(bounds.center.x, 0.05, bounds.center.z);
    let radius = bounds.radius;
    let segments = 32;
    let color = Color::srgb(1.0, 0.9, 0.2);

    for i in 0..segments {
        let t1 = (i as f32 / segments as f32) * std::f32::consts::TAU;
        let t2 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;

        let p1 = center + Vec3::new(t1.cos() * radius, 0.0, t1.sin() * radius);
        let p2 = center + Vec3::new(t2.cos() * radius, 0.0, t2.sin() * radius);

        gizmos.line(p1, p2, color);
    }
}

fn update_text_ui(
    zoo: Res<ZooWrapper>,
    mut stats_query: Query<&mut Text, (With<StatsText>, Without<InfoText>, Without<ControlsText>)>,
    mut info_query: Query<&mut Text, (With<InfoText>, Without<StatsText>, Without<ControlsText>)>,
    mut controls_query: Query<&mut Text, (With<ControlsText>, Without<StatsText>, Without<InfoText>)>,
) {
    for mut text in &mut stats_query {
        let per_species: Vec<String> = Species::ALL
            .iter()
            .map(|&s| format!("{}: {}", s, zoo.0.species_count(s)))
            .collect();
        **text = format!(
            "Animals: {}\nVisitors: {}\n{}",
            zoo.0.animal_count(),
            zoo.0.visitor_count(),
            per_species.join("  ")
        );
    }

    for mut text in &mut info_query {
        **text = zoo.0.selection_text();
    }

    for mut text in &mut controls_query {
        **text = format!(
            "[Space] {}   [N] {}   [R] Reset Camera   [V] Refresh Visitors\nLeft click: inspect   Right drag: orbit   Wheel: zoom",
            zoo.0.animation_label(),
            zoo.0.day_phase().toggle_label()
        );
    }
}
