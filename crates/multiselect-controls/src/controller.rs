//! The multi-select controller
//!
//! Pointer gestures on the surface are resolved into actions at pointer-down,
//! hit-tested at pointer-up and applied to the selection. Gizmo changes on the
//! selection pivot are spread across every selected object.

use std::collections::HashSet;
use std::sync::Arc;

use multiselect_core::{Camera, SceneGraph, Transform};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::action::{Action, Intent};
use crate::bridge::GizmoBridge;
use crate::config::{Config, ConfigUpdate};
use crate::events::{EventKind, ListenerId, Listeners, SelectionEvent};
use crate::gizmo::{GizmoEvent, HeadlessGizmo, SharedCameraControls, TransformGizmo};
use crate::input::{PointerEvent, PointerTracker};
use crate::raycaster::Raycaster;
use crate::selection::Selection;
use crate::surface::{Surface, SurfaceEvent, SurfaceEventKind};

/// Live list of selectable objects, shared with the host
pub type SharedSelectables = Arc<RwLock<Vec<Uuid>>>;

/// Create a shared selectable list
pub fn shared_selectables(objects: impl IntoIterator<Item = Uuid>) -> SharedSelectables {
    Arc::new(RwLock::new(objects.into_iter().collect()))
}

/// Pointer-driven selection controls for a set of scene objects
pub struct MultiSelect<D: Surface, G: TransformGizmo = HeadlessGizmo> {
    /// When false, pointer input is ignored; tracked pointers are kept
    pub enabled: bool,
    config: Config,
    camera: Camera,
    surface: D,
    selectables: SharedSelectables,
    pointers: PointerTracker,
    /// Action resolved at the last pointer-down
    state: Action,
    raycaster: Raycaster,
    selection: Selection,
    gizmo: Option<G>,
    bridge: GizmoBridge,
    camera_controls: Option<SharedCameraControls>,
    listeners: Listeners,
    /// Set when a pointer-down grabbed the gizmo; swallows the matching pointer-up
    ignore_pointer_up: bool,
    active: bool,
}

impl<D: Surface, G: TransformGizmo> MultiSelect<D, G> {
    /// Create the controls and start listening on `surface`.
    ///
    /// The gizmo is kept even when `config.use_transform_controls` is off, so
    /// it can be switched on later through [`Self::update_config`].
    pub fn new(
        camera: Camera,
        surface: D,
        selectables: SharedSelectables,
        config: Config,
        gizmo: Option<G>,
    ) -> Self {
        let mut controls = Self {
            enabled: true,
            config,
            camera,
            surface,
            selectables,
            pointers: PointerTracker::new(),
            state: Action::NONE,
            raycaster: Raycaster::new(),
            selection: Selection::new(),
            gizmo,
            bridge: GizmoBridge::new(),
            camera_controls: None,
            listeners: Listeners::new(),
            ignore_pointer_up: false,
            active: false,
        };
        controls.activate();
        controls
    }

    // ============== Configuration ==============

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Merge a partial configuration into the current one
    pub fn update_config(&mut self, update: ConfigUpdate) {
        self.config.merge(&update);
        if let Some(controls) = update.camera_controls {
            self.camera_controls = controls;
        }

        // Keep the gizmo in step with the flag
        if let Some(gizmo) = self.gizmo.as_mut() {
            if !self.config.use_transform_controls {
                gizmo.detach();
            } else if !self.selection.is_empty() && !gizmo.is_attached() {
                gizmo.attach(self.selection.pivot());
            }
        }
    }

    /// Camera controls to pause while the gizmo is dragged
    pub fn set_camera_controls(&mut self, controls: Option<SharedCameraControls>) {
        self.camera_controls = controls;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    pub fn selectables(&self) -> &SharedSelectables {
        &self.selectables
    }

    /// The raycaster used for hit testing, for tuning its limits
    pub fn raycaster(&self) -> &Raycaster {
        &self.raycaster
    }

    pub fn raycaster_mut(&mut self) -> &mut Raycaster {
        &mut self.raycaster
    }

    pub fn transform_gizmo(&self) -> Option<&G> {
        self.gizmo.as_ref()
    }

    pub fn transform_gizmo_mut(&mut self) -> Option<&mut G> {
        self.gizmo.as_mut()
    }

    // ============== Listeners ==============

    pub fn add_listener<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&SelectionEvent) + Send + 'static,
    {
        self.listeners.add(kind, handler)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    // ============== Queries ==============

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected object IDs in selection order
    pub fn selected_objects(&self) -> Vec<Uuid> {
        self.selection.ids().collect()
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selection.contains(id)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    /// True while the gizmo is shown on the pivot
    pub fn is_gizmo_attached(&self) -> bool {
        self.gizmo.as_ref().is_some_and(|g| g.is_attached())
    }

    /// Pivot proxy transform, None while nothing is selected
    pub fn pivot(&self) -> Option<&Transform> {
        (!self.selection.is_empty()).then(|| self.selection.pivot())
    }

    /// Action resolved at the last pointer-down
    pub fn state(&self) -> Action {
        self.state
    }

    pub fn active_pointers(&self) -> &PointerTracker {
        &self.pointers
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // ============== Lifecycle ==============

    /// Subscribe to surface events
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.surface.add_listeners(&SurfaceEventKind::ALL);
        self.active = true;
        tracing::info!("Multi-select controls activated");
    }

    /// Unsubscribe from surface events and drop the selection
    pub fn deactivate(&mut self) {
        if self.active {
            self.surface.remove_listeners(&SurfaceEventKind::ALL);
            self.active = false;
            tracing::info!("Multi-select controls deactivated");
        }
        self.deselect_all_objects();
        self.ignore_pointer_up = false;
    }

    /// Release everything the controls hold; safe to call repeatedly
    pub fn dispose(&mut self) {
        self.deactivate();
    }

    // ============== Surface Events ==============

    /// Route a surface event to its handler.
    ///
    /// Returns true when the host should suppress the event's default
    /// behavior (only ever for the context menu).
    pub fn handle_event<S>(&mut self, event: SurfaceEvent, scene: &mut S) -> bool
    where
        S: SceneGraph + ?Sized,
    {
        match event {
            SurfaceEvent::ContextMenu => return self.on_context_menu(),
            SurfaceEvent::PointerDown(e) => self.on_pointer_down(&e),
            SurfaceEvent::PointerUp(e) => self.on_pointer_up(&e, scene),
            SurfaceEvent::PointerMove(e) => self.on_pointer_move(&e),
        }
        false
    }

    /// Suppress the context menu while the right button is bound to something
    pub fn on_context_menu(&self) -> bool {
        self.active && self.config.bindings.mouse.right != Action::NONE
    }

    /// Track the pointer and latch the action for this gesture
    pub fn on_pointer_down(&mut self, event: &PointerEvent) {
        if !self.accepts_input() {
            return;
        }

        // Grabbing the gizmo is not a selection gesture
        if let Some(gizmo) = self.active_gizmo()
            && gizmo.is_axis_active()
        {
            self.ignore_pointer_up = true;
            return;
        }

        let count = self.pointers.press(event);
        self.state = self.config.bindings.resolve(event, count);
        tracing::debug!(
            "Pointer {} down ({:?}, {} active): {:?}",
            event.pointer_id,
            event.pointer_type,
            count,
            self.state
        );
    }

    /// Finish the gesture: hit-test and apply the latched action
    pub fn on_pointer_up<S>(&mut self, event: &PointerEvent, scene: &mut S)
    where
        S: SceneGraph + ?Sized,
    {
        if !self.accepts_input() {
            return;
        }
        if self.ignore_pointer_up {
            self.ignore_pointer_up = false;
            return;
        }
        if self.pointers.release(event.pointer_id).is_none() {
            tracing::debug!("Pointer {} up without a tracked press", event.pointer_id);
            return;
        }
        let Some(intent) = self.state.intent() else {
            return;
        };

        self.update_pointer(event);
        self.raycaster.set_from_camera(&self.camera);

        let candidates = self.hit_candidates();
        match self
            .raycaster
            .intersect_first(&*scene, &candidates, self.config.recursive)
        {
            Some(hit) => {
                tracing::debug!("Hit {} at {:.3}", hit.object, hit.distance);
                self.apply_intent(intent, hit.object, &*scene);
            }
            None => {
                tracing::debug!("Raycast miss");
                if self.config.deselect_on_raycast_miss {
                    self.deselect_all_objects();
                }
            }
        }
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        if !self.accepts_input() {
            return;
        }
        self.pointers.track_move(event);
        self.update_pointer(event);
    }

    // ============== Gizmo Events ==============

    /// Apply a gizmo notification.
    ///
    /// Returns true if the notification changed anything.
    pub fn handle_gizmo_event<S>(&mut self, event: GizmoEvent, scene: &mut S) -> bool
    where
        S: SceneGraph + ?Sized,
    {
        let Some(gizmo) = self.active_gizmo() else {
            return false;
        };
        let (mode, axis_and_angle) = (gizmo.mode(), gizmo.axis_and_angle());

        match event {
            GizmoEvent::DraggingChanged(dragging) => {
                self.bridge.dragging_changed(
                    dragging,
                    &mut self.selection,
                    &*scene,
                    self.camera_controls.as_ref(),
                );
                true
            }
            GizmoEvent::ObjectChanged(pivot) => {
                if self.selection.is_empty() {
                    return false;
                }
                self.bridge.object_changed(
                    pivot,
                    mode,
                    axis_and_angle,
                    &self.config,
                    &mut self.selection,
                    scene,
                )
            }
        }
    }

    // ============== Selection ==============

    /// Add an object to the selection.
    ///
    /// Returns false (and notifies nobody) if it is already selected or not
    /// in the scene.
    pub fn select_object<S>(&mut self, id: Uuid, scene: &S) -> bool
    where
        S: SceneGraph + ?Sized,
    {
        if self.selection.contains(id) {
            return false;
        }
        if !scene.contains(id) {
            tracing::warn!("Cannot select {}: not in the scene", id);
            return false;
        }
        let Some(local) = scene.local_transform(id) else {
            return false;
        };

        self.selection.insert(id, local.position);
        self.bridge.reset();
        self.refresh_pivot(scene);

        tracing::debug!("Selected {} ({} total)", id, self.selection.len());
        self.listeners.dispatch(&SelectionEvent::Select { object: id });
        true
    }

    /// Remove an object from the selection.
    ///
    /// Returns false (and notifies nobody) if it was not selected.
    pub fn deselect_object<S>(&mut self, id: Uuid, scene: &S) -> bool
    where
        S: SceneGraph + ?Sized,
    {
        if !self.selection.remove(id) {
            return false;
        }
        self.bridge.reset();
        self.refresh_pivot(scene);

        tracing::debug!("Deselected {} ({} left)", id, self.selection.len());
        self.listeners
            .dispatch(&SelectionEvent::Deselect { object: id });
        true
    }

    /// Flip an object's membership; returns true if it is now selected
    pub fn toggle_object<S>(&mut self, id: Uuid, scene: &S) -> bool
    where
        S: SceneGraph + ?Sized,
    {
        if self.selection.contains(id) {
            self.deselect_object(id, scene);
            false
        } else {
            self.select_object(id, scene)
        }
    }

    /// Empty the selection, notifying once per removed object in selection order
    pub fn deselect_all_objects(&mut self) {
        let removed = self.selection.clear();
        self.bridge.reset();
        if let Some(gizmo) = self.gizmo.as_mut() {
            gizmo.detach();
        }

        if !removed.is_empty() {
            tracing::debug!("Deselecting all {} objects", removed.len());
        }
        for id in removed {
            self.listeners
                .dispatch(&SelectionEvent::Deselect { object: id });
        }
    }

    // ============== Internals ==============

    fn accepts_input(&self) -> bool {
        self.active && self.enabled
    }

    fn active_gizmo(&self) -> Option<&G> {
        self.gizmo
            .as_ref()
            .filter(|_| self.config.use_transform_controls)
    }

    fn update_pointer(&mut self, event: &PointerEvent) {
        let rect = self.surface.bounding_rect();
        if let Some(ndc) = rect.to_ndc(event.client_x, event.client_y) {
            self.raycaster.set_pointer(ndc);
        }
    }

    /// Selectable objects plus the current selection, without duplicates
    fn hit_candidates(&self) -> Vec<Uuid> {
        let mut seen = HashSet::new();
        let selectables = self.selectables.read();
        selectables
            .iter()
            .copied()
            .chain(self.selection.ids())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    fn apply_intent<S>(&mut self, intent: Intent, id: Uuid, scene: &S)
    where
        S: SceneGraph + ?Sized,
    {
        let selected = self.selection.contains(id);
        match (intent, selected) {
            (Intent::Select | Intent::Toggle, false) => {
                self.select_object(id, scene);
            }
            (Intent::Deselect | Intent::Toggle, true) => {
                self.deselect_object(id, scene);
            }
            (Intent::Select, true) | (Intent::Deselect, false) => {}
        }
    }

    /// Recompute the pivot for the current members and re-attach the gizmo.
    /// With an empty selection the gizmo stays detached.
    fn refresh_pivot<S>(&mut self, scene: &S)
    where
        S: SceneGraph + ?Sized,
    {
        let gizmo_enabled = self.config.use_transform_controls;
        if let Some(gizmo) = self.gizmo.as_mut() {
            gizmo.detach();
        }
        if self.selection.recompute_pivot(scene).is_none() {
            return;
        }
        if gizmo_enabled && let Some(gizmo) = self.gizmo.as_mut() {
            gizmo.attach(self.selection.pivot());
        }
    }
}
