//! Interfaces to the external transform gizmo and camera controls

use std::sync::Arc;

use glam::Vec3;
use multiselect_core::Transform;
use parking_lot::Mutex;

/// Which component the gizmo is currently editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

/// Notifications delivered by the gizmo while the user drags it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoEvent {
    /// The pivot was moved; carries the pivot transform the gizmo produced
    ObjectChanged(Transform),
    /// A drag started (`true`) or ended (`false`)
    DraggingChanged(bool),
}

/// The on-screen transform widget driven by the selection pivot
pub trait TransformGizmo {
    /// Show the gizmo at the given pivot.
    fn attach(&mut self, pivot: &Transform);

    /// Hide the gizmo.
    fn detach(&mut self);

    fn is_attached(&self) -> bool;

    fn mode(&self) -> GizmoMode;

    fn set_mode(&mut self, mode: GizmoMode);

    /// Rotation accumulated since the current drag began, as (unit axis, radians).
    ///
    /// May be unavailable on the first tick of a rotate drag.
    fn axis_and_angle(&self) -> Option<(Vec3, f32)>;

    /// True while one of the gizmo handles is hovered or grabbed.
    fn is_axis_active(&self) -> bool;
}

/// Camera navigation that must pause while the gizmo is dragged
pub trait CameraControls {
    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;
}

/// Shared camera-controls handle
pub type SharedCameraControls = Arc<Mutex<dyn CameraControls + Send>>;

/// A gizmo with no rendering, driven programmatically.
///
/// Useful for headless hosts and tests; a windowed host supplies its own
/// [`TransformGizmo`] implementation.
#[derive(Debug, Default)]
pub struct HeadlessGizmo {
    attached: Option<Transform>,
    mode: GizmoMode,
    rotation: Option<(Vec3, f32)>,
    axis_active: bool,
}

impl HeadlessGizmo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pivot the gizmo was last attached to
    pub fn attached_pivot(&self) -> Option<&Transform> {
        self.attached.as_ref()
    }

    /// Set the rotation reported by [`TransformGizmo::axis_and_angle`]
    pub fn set_rotation(&mut self, rotation: Option<(Vec3, f32)>) {
        self.rotation = rotation;
    }

    pub fn set_axis_active(&mut self, active: bool) {
        self.axis_active = active;
    }
}

impl TransformGizmo for HeadlessGizmo {
    fn attach(&mut self, pivot: &Transform) {
        self.attached = Some(*pivot);
    }

    fn detach(&mut self) {
        self.attached = None;
    }

    fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    fn mode(&self) -> GizmoMode {
        self.mode
    }

    fn set_mode(&mut self, mode: GizmoMode) {
        self.mode = mode;
    }

    fn axis_and_angle(&self) -> Option<(Vec3, f32)> {
        self.rotation
    }

    fn is_axis_active(&self) -> bool {
        self.axis_active
    }
}
