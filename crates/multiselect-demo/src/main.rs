//! Multi-select demo entry point
//!
//! Builds a small scene, drives the controls with scripted pointer and gizmo
//! input and logs every selection change.

use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;
use multiselect_controls::{
    CameraControls, Config, ConfigUpdate, EventKind, FixedSurface, GizmoEvent, HeadlessGizmo,
    MouseButton, MultiSelect, PointerEvent, SharedCameraControls, Surface, SurfaceEvent,
    shared_selectables,
};
use multiselect_core::{Camera, MeshGeometry, Scene, SceneGraph, SceneNode, Transform};
use parking_lot::Mutex;
use uuid::Uuid;

type Controls = MultiSelect<FixedSurface, HeadlessGizmo>;

/// Stand-in for orbit navigation; only logs when it is paused or resumed
struct OrbitControls {
    enabled: bool,
}

impl CameraControls for OrbitControls {
    fn set_enabled(&mut self, enabled: bool) {
        tracing::info!("Orbit controls {}", if enabled { "resumed" } else { "paused" });
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("multiselect")
        .join("config.ron")
}

fn load_config() -> Config {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config_path);

    if !path.exists() {
        tracing::info!("No config file at {:?}, using defaults", path);
        return Config::default();
    }
    Config::load(&path).unwrap_or_else(|e| {
        tracing::warn!("{}, using defaults", e);
        Config::default()
    })
}

/// Press and release at the screen position of a world point
fn click(controls: &mut Controls, scene: &mut Scene, world: Vec3, button: MouseButton) {
    let Some(ndc) = controls.camera().world_to_ndc(world) else {
        tracing::warn!("{:?} is behind the camera", world);
        return;
    };
    let (x, y) = controls.surface().bounding_rect().from_ndc(ndc);

    let down = PointerEvent::mouse(1, x, y, button.mask());
    let up = PointerEvent::mouse(1, x, y, 0);
    controls.handle_event(SurfaceEvent::PointerDown(down), scene);
    controls.handle_event(SurfaceEvent::PointerUp(up), scene);
}

fn log_positions(scene: &Scene, ids: &[Uuid]) {
    for id in ids {
        if let (Some(node), Some(p)) = (scene.node(*id), scene.world_position(*id)) {
            tracing::info!("  {} at ({:.2}, {:.2}, {:.2})", node.name, p.x, p.y, p.z);
        }
    }
}

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting multi-select demo");

    let mut scene = Scene::new();
    let cubes: Vec<Uuid> = [-3.0, 0.0, 3.0]
        .into_iter()
        .enumerate()
        .map(|(i, x)| {
            scene.add(
                SceneNode::with_mesh(format!("Cube {}", i + 1), MeshGeometry::cuboid(Vec3::ONE))
                    .at(Transform::from_position(Vec3::new(x, 0.0, 0.0))),
            )
        })
        .collect();

    let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 75.0, 16.0 / 9.0);
    let mut controls: Controls = MultiSelect::new(
        camera,
        FixedSurface::new(1280.0, 720.0),
        shared_selectables(cubes.clone()),
        load_config(),
        Some(HeadlessGizmo::new()),
    );

    let orbit: SharedCameraControls = Arc::new(Mutex::new(OrbitControls { enabled: true }));
    controls.update_config(ConfigUpdate {
        camera_controls: Some(Some(orbit)),
        ..Default::default()
    });

    controls.add_listener(EventKind::Select, |e| {
        tracing::info!("select: {}", e.object());
    });
    controls.add_listener(EventKind::Deselect, |e| {
        tracing::info!("deselect: {}", e.object());
    });

    // Pick the two outer cubes
    click(&mut controls, &mut scene, Vec3::new(-3.0, 0.0, 0.0), MouseButton::Left);
    click(&mut controls, &mut scene, Vec3::new(3.0, 0.0, 0.0), MouseButton::Left);
    tracing::info!("{} objects selected", controls.selection_len());

    // Drag the shared pivot upwards
    if let Some(pivot) = controls.pivot().copied() {
        let mut moved = pivot;
        moved.position += Vec3::new(0.0, 1.5, 0.0);

        controls.handle_gizmo_event(GizmoEvent::DraggingChanged(true), &mut scene);
        controls.handle_gizmo_event(GizmoEvent::ObjectChanged(moved), &mut scene);
        controls.handle_gizmo_event(GizmoEvent::DraggingChanged(false), &mut scene);
    }
    log_positions(&scene, &cubes);

    // Right click removes one of them again
    click(&mut controls, &mut scene, Vec3::new(3.0, 1.5, 0.0), MouseButton::Right);
    tracing::info!("{} objects selected", controls.selection_len());

    controls.deselect_all_objects();
    controls.dispose();

    tracing::info!("Demo finished");
}
