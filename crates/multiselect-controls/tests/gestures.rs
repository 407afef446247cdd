//! End-to-end gesture scenarios driven through surface events

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Quat, Vec3};
use multiselect_controls::{
    CameraControls, Config, ConfigUpdate, EventKind, FixedSurface, GizmoEvent, GizmoMode,
    HeadlessGizmo, MouseButton, MultiSelect, PointerEvent, SelectionEvent, SharedCameraControls,
    Surface, SurfaceEvent, SurfaceRect, TransformGizmo, shared_selectables,
};
use multiselect_core::{Camera, MeshGeometry, Scene, SceneGraph, SceneNode, Transform};
use parking_lot::Mutex;
use uuid::Uuid;

type Controls = MultiSelect<FixedSurface, HeadlessGizmo>;

struct Harness {
    scene: Scene,
    cubes: Vec<Uuid>,
    controls: Controls,
    events: Arc<Mutex<Vec<SelectionEvent>>>,
}

fn harness(xs: &[f32], config: Config) -> Harness {
    let mut scene = Scene::new();
    let cubes: Vec<Uuid> = xs
        .iter()
        .enumerate()
        .map(|(i, x)| {
            scene.add(
                SceneNode::with_mesh(format!("cube{}", i), MeshGeometry::cuboid(Vec3::ONE))
                    .at(Transform::from_position(Vec3::new(*x, 0.0, 0.0))),
            )
        })
        .collect();

    let camera = Camera::perspective(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO, 60.0, 1.0);
    let mut controls = MultiSelect::new(
        camera,
        FixedSurface::new(600.0, 600.0),
        shared_selectables(cubes.clone()),
        config,
        Some(HeadlessGizmo::new()),
    );

    let events = Arc::new(Mutex::new(Vec::new()));
    for kind in [EventKind::Select, EventKind::Deselect] {
        let sink = events.clone();
        controls.add_listener(kind, move |e| sink.lock().push(*e));
    }

    Harness {
        scene,
        cubes,
        controls,
        events,
    }
}

impl Harness {
    fn screen(&self, world: Vec3) -> (f32, f32) {
        let ndc = self.controls.camera().world_to_ndc(world).unwrap();
        self.controls.surface().bounding_rect().from_ndc(ndc)
    }

    fn send(&mut self, event: SurfaceEvent) -> bool {
        self.controls.handle_event(event, &mut self.scene)
    }

    fn mouse_click(&mut self, world: Vec3, buttons: u8) {
        let (x, y) = self.screen(world);
        self.send(SurfaceEvent::PointerDown(PointerEvent::mouse(1, x, y, buttons)));
        self.send(SurfaceEvent::PointerUp(PointerEvent::mouse(1, x, y, 0)));
    }

    fn tap(&mut self, world: Vec3) {
        let (x, y) = self.screen(world);
        self.send(SurfaceEvent::PointerDown(PointerEvent::touch(10, x, y)));
        self.send(SurfaceEvent::PointerUp(PointerEvent::touch(10, x, y)));
    }

    fn position(&self, id: Uuid) -> Vec3 {
        self.scene.local_transform(id).unwrap().position
    }

    fn event_kinds(&self) -> Vec<EventKind> {
        self.events.lock().iter().map(|e| e.kind()).collect()
    }
}

const LEFT: u8 = MouseButton::Left.mask();
const RIGHT: u8 = MouseButton::Right.mask();

#[test]
fn test_tap_toggles_membership() {
    let mut h = harness(&[-2.0, 2.0], Config::default());
    let target = h.cubes[1];

    h.tap(Vec3::new(2.0, 0.0, 0.0));
    assert!(h.controls.is_selected(target));

    h.tap(Vec3::new(2.0, 0.0, 0.0));
    assert!(!h.controls.is_selected(target));

    assert_eq!(h.event_kinds(), vec![EventKind::Select, EventKind::Deselect]);
    assert!(h.events.lock().iter().all(|e| e.object() == target));
}

#[test]
fn test_second_finger_does_nothing() {
    let mut h = harness(&[0.0], Config::default());
    let (x, y) = h.screen(Vec3::ZERO);

    h.send(SurfaceEvent::PointerDown(PointerEvent::touch(1, x, y)));
    h.send(SurfaceEvent::PointerDown(PointerEvent::touch(2, x, y)));
    assert_eq!(h.controls.active_pointers().len(), 2);

    h.send(SurfaceEvent::PointerUp(PointerEvent::touch(2, x, y)));
    assert!(h.controls.selection().is_empty());
}

#[test]
fn test_deselect_all_notifies_each_member() {
    let mut h = harness(&[-4.0, -2.0, 0.0, 2.0, 4.0], Config::default());
    for id in h.cubes.clone() {
        h.controls.select_object(id, &h.scene);
    }
    h.events.lock().clear();

    h.controls.deselect_all_objects();

    let deselected: Vec<Uuid> = h.events.lock().iter().map(|e| e.object()).collect();
    assert_eq!(deselected, h.cubes);
    assert!(h.event_kinds().iter().all(|k| *k == EventKind::Deselect));
    assert!(!h.controls.is_gizmo_attached());
}

fn select_three_by_click(h: &mut Harness) {
    for x in [-2.0, 0.0, 2.0] {
        h.mouse_click(Vec3::new(x, 0.0, 0.0), LEFT);
    }
    assert_eq!(h.controls.selection_len(), 3);
}

#[test]
fn test_miss_keeps_selection_by_default() {
    let mut h = harness(&[-2.0, 0.0, 2.0], Config::default());
    select_three_by_click(&mut h);

    h.mouse_click(Vec3::new(4.0, 4.0, 0.0), LEFT);
    assert_eq!(h.controls.selection_len(), 3);
}

#[test]
fn test_miss_clears_selection_when_configured() {
    let config = Config {
        deselect_on_raycast_miss: true,
        ..Config::default()
    };
    let mut h = harness(&[-2.0, 0.0, 2.0], config);
    select_three_by_click(&mut h);
    h.events.lock().clear();

    h.mouse_click(Vec3::new(4.0, 4.0, 0.0), LEFT);
    assert!(h.controls.selection().is_empty());
    assert_eq!(h.event_kinds(), vec![EventKind::Deselect; 3]);
}

#[test]
fn test_select_wins_over_deselect_when_both_buttons_pressed() {
    let mut h = harness(&[0.0], Config::default());

    h.mouse_click(Vec3::ZERO, LEFT | RIGHT);
    assert_eq!(h.controls.selection_len(), 1);

    // Already selected: the combined press leaves it alone
    h.mouse_click(Vec3::ZERO, LEFT | RIGHT);
    assert_eq!(h.controls.selection_len(), 1);
    assert_eq!(h.event_kinds(), vec![EventKind::Select]);
}

#[test]
fn test_pointer_up_without_press_is_ignored() {
    let mut h = harness(&[0.0], Config::default());
    let (x, y) = h.screen(Vec3::ZERO);

    // Latch SELECT with a gesture that misses
    h.mouse_click(Vec3::new(4.0, 4.0, 0.0), LEFT);

    h.send(SurfaceEvent::PointerUp(PointerEvent::mouse(7, x, y, 0)));
    assert!(h.controls.selection().is_empty());
}

#[test]
fn test_selectables_list_is_live() {
    let mut h = harness(&[0.0], Config::default());
    let late = h.scene.add(
        SceneNode::with_mesh("late", MeshGeometry::cuboid(Vec3::ONE))
            .at(Transform::from_position(Vec3::new(3.0, 0.0, 0.0))),
    );

    h.mouse_click(Vec3::new(3.0, 0.0, 0.0), LEFT);
    assert!(!h.controls.is_selected(late));

    h.controls.selectables().write().push(late);
    h.mouse_click(Vec3::new(3.0, 0.0, 0.0), LEFT);
    assert!(h.controls.is_selected(late));

    // Selected objects stay hittable after leaving the list
    h.controls.selectables().write().retain(|id| *id != late);
    h.mouse_click(Vec3::new(3.0, 0.0, 0.0), RIGHT);
    assert!(!h.controls.is_selected(late));
}

#[test]
fn test_offset_surface_maps_clicks() {
    let mut h = harness(&[-2.0, 2.0], Config::default());
    h.controls
        .surface_mut()
        .set_rect(SurfaceRect::new(120.0, 40.0, 600.0, 600.0));

    h.mouse_click(Vec3::new(-2.0, 0.0, 0.0), LEFT);
    assert_eq!(h.controls.selected_objects(), vec![h.cubes[0]]);
}

#[test]
fn test_disabled_controls_still_release_on_dispose() {
    let mut h = harness(&[0.0], Config::default());
    h.mouse_click(Vec3::ZERO, LEFT);
    h.controls.set_enabled(false);

    h.mouse_click(Vec3::ZERO, RIGHT);
    assert_eq!(h.controls.selection_len(), 1);

    h.controls.dispose();
    h.controls.dispose();
    assert!(h.controls.selection().is_empty());
    assert_eq!(h.event_kinds(), vec![EventKind::Select, EventKind::Deselect]);
    assert!(!h.send(SurfaceEvent::ContextMenu));
}

#[test]
fn test_reenabling_resumes_gesture_in_flight() {
    let mut h = harness(&[0.0], Config::default());
    let (x, y) = h.screen(Vec3::ZERO);

    h.send(SurfaceEvent::PointerDown(PointerEvent::mouse(3, x, y, LEFT)));
    h.controls.set_enabled(false);

    // Ignored while disabled; the press stays tracked
    h.send(SurfaceEvent::PointerUp(PointerEvent::mouse(3, x, y, 0)));
    assert!(h.controls.selection().is_empty());
    assert_eq!(h.controls.active_pointers().len(), 1);
    assert!(h.controls.active_pointers().get(3).is_some());

    h.controls.set_enabled(true);
    h.send(SurfaceEvent::PointerUp(PointerEvent::mouse(3, x, y, 0)));
    assert!(h.controls.is_selected(h.cubes[0]));
    assert!(h.controls.active_pointers().is_empty());
}

#[test]
fn test_pointer_move_updates_record_and_ray() {
    let mut h = harness(&[2.0], Config::default());
    let (x0, y0) = h.screen(Vec3::new(-3.0, 2.0, 0.0));
    let (x1, y1) = h.screen(Vec3::new(2.0, 0.0, 0.0));

    h.send(SurfaceEvent::PointerDown(PointerEvent::mouse(4, x0, y0, LEFT)));
    h.send(SurfaceEvent::PointerMove(PointerEvent::mouse(4, x1, y1, LEFT)));

    let record = *h.controls.active_pointers().get(4).unwrap();
    assert_eq!((record.client_x, record.client_y), (x1, y1));
    assert!((record.delta_x - (x1 - x0)).abs() < 1e-4);
    assert!((record.delta_y - (y1 - y0)).abs() < 1e-4);

    let expected = h.controls.surface().bounding_rect().to_ndc(x1, y1).unwrap();
    assert!(h.controls.raycaster().pointer().abs_diff_eq(expected, 1e-5));

    // The gesture ends over the cube it was dragged onto
    h.send(SurfaceEvent::PointerUp(PointerEvent::mouse(4, x1, y1, 0)));
    assert_eq!(h.controls.selected_objects(), vec![h.cubes[0]]);
}

struct OrbitStub {
    enabled: bool,
    toggles: usize,
}

impl CameraControls for OrbitStub {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.toggles += 1;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[test]
fn test_group_rotation_orbits_pivot() {
    let config = Config {
        rotate_as_group: true,
        ..Config::default()
    };
    let mut h = harness(&[-3.0, 3.0], config);
    let (a, b) = (h.cubes[0], h.cubes[1]);
    h.controls.select_object(a, &h.scene);
    h.controls.select_object(b, &h.scene);

    let orbit = Arc::new(Mutex::new(OrbitStub {
        enabled: true,
        toggles: 0,
    }));
    let shared: SharedCameraControls = orbit.clone();
    h.controls.update_config(ConfigUpdate {
        camera_controls: Some(Some(shared)),
        ..Default::default()
    });

    let gizmo = h.controls.transform_gizmo_mut().unwrap();
    gizmo.set_mode(GizmoMode::Rotate);
    gizmo.set_rotation(Some((Vec3::Z, FRAC_PI_2)));

    let mut pivot = *h.controls.pivot().unwrap();
    pivot.rotation = Quat::from_rotation_z(FRAC_PI_2);

    h.controls
        .handle_gizmo_event(GizmoEvent::DraggingChanged(true), &mut h.scene);
    assert!(!orbit.lock().is_enabled());

    // A repeated tick with the same accumulated angle must not compound
    for _ in 0..2 {
        h.controls
            .handle_gizmo_event(GizmoEvent::ObjectChanged(pivot), &mut h.scene);
    }
    h.controls
        .handle_gizmo_event(GizmoEvent::DraggingChanged(false), &mut h.scene);

    assert!(orbit.lock().is_enabled());
    assert_eq!(orbit.lock().toggles, 2);
    assert!(h.position(a).abs_diff_eq(Vec3::new(0.0, -3.0, 0.0), 1e-4));
    assert!(h.position(b).abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), 1e-4));

    // Offsets were re-measured, so a following translate keeps the new layout
    h.controls.transform_gizmo_mut().unwrap().set_mode(GizmoMode::Translate);
    let mut moved = *h.controls.pivot().unwrap();
    moved.position += Vec3::X;
    h.controls
        .handle_gizmo_event(GizmoEvent::ObjectChanged(moved), &mut h.scene);

    assert!(h.position(a).abs_diff_eq(Vec3::new(1.0, -3.0, 0.0), 1e-4));
    assert!(h.position(b).abs_diff_eq(Vec3::new(1.0, 3.0, 0.0), 1e-4));
}
