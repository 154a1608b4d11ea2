use bevy::prelude::*;
use bevy::ecs::system::Local;
use bevy::window::{PrimaryWindow, WindowResolution};

use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, OrbitAnchor, Particle};
use crate::visualization::sink::{fps_title, trail_alpha, FpsCounter, RenderSink, WINDOW_TITLE};

pub fn run_2d(scenario: Scenario) {
    println!(
        "run_2d: starting Bevy 2D viewer with {} particles around {} orbits",
        scenario.population.len(),
        scenario.anchors.len()
    );

    let resolution = WindowResolution::new(scenario.parameters.width as f32, scenario.parameters.height as f32);

    App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: format!("{WINDOW_TITLE} - FPS: 0"),
                resolution,
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_camera_system)
        .add_systems(Update, (simulation_step_system, draw_system, fps_title_system).chain())
        .add_systems(Update, exit_on_escape_system)
        .run();
}

fn setup_camera_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

fn simulation_step_system(mut scenario: ResMut<Scenario>) {
    let report = scenario.update();
    debug!(
        "frame {}: {} absorbed, {} spawned, {} orbiting",
        scenario.frame, report.absorbed, report.spawned, report.orbiting
    );
}

fn draw_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let mut sink = GizmoSink {
        gizmos: &mut gizmos,
        half_extent: Vec2::new(scenario.parameters.width as f32, scenario.parameters.height as f32) * 0.5,
        trail_length: scenario.parameters.trail_length,
    };
    scenario.present(&mut sink);
}

fn fps_title_system(
    mut fps: Local<FpsCounter>,
    scenario: Res<Scenario>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Some(rate) = fps.tick() else {
        return;
    };
    info!("FPS: {rate:.2}, absorbed so far: {}", scenario.absorbed_total());
    for mut window in &mut windows {
        window.title = fps_title(rate);
    }
}

fn exit_on_escape_system(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
}

/// Simulation space is top-left origin with y down; bevy's 2D world is
/// centred with y up
fn to_world(half_extent: Vec2, p: &NVec2) -> Vec2 {
    Vec2::new(p.x as f32 - half_extent.x, half_extent.y - p.y as f32)
}

/// Immediate-mode drawing through gizmos; bevy clears them every frame
struct GizmoSink<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    half_extent: Vec2,
    trail_length: usize,
}

impl RenderSink for GizmoSink<'_, '_, '_> {
    fn begin_frame(&mut self) {}

    fn draw_orbit(&mut self, anchor: &OrbitAnchor) {
        let centre = to_world(self.half_extent, &anchor.position);
        self.gizmos.circle_2d(centre, anchor.ring_radius as f32, Color::srgb_u8(100, 100, 100));
    }

    fn draw_particle(&mut self, particle: &Particle) {
        let half_extent = self.half_extent;
        let trail_length = self.trail_length;
        let c = particle.color;
        let points = particle.trail.iter().enumerate().map(|(i, p)| {
            (to_world(half_extent, p), Color::srgba_u8(c.r, c.g, c.b, trail_alpha(i, trail_length)))
        });
        self.gizmos.linestrip_gradient_2d(points);
    }

    fn end_frame(&mut self) {}
}
