//! Redistributes gizmo changes on the pivot to every selected object

use glam::{Mat4, Quat, Vec3};
use multiselect_core::{SceneGraph, Transform};
use uuid::Uuid;

use crate::config::Config;
use crate::gizmo::{GizmoMode, SharedCameraControls};
use crate::selection::Selection;

/// State captured when a drag begins
#[derive(Debug, Clone)]
struct DragSnapshot {
    pivot: Vec3,
    transforms: Vec<(Uuid, Transform)>,
}

/// Gizmo interaction state
#[derive(Debug, Default)]
pub struct GizmoBridge {
    dragging: bool,
    snapshot: Option<DragSnapshot>,
}

impl GizmoBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Forget any drag-start snapshot, e.g. after the membership changed
    pub fn reset(&mut self) {
        self.snapshot = None;
    }

    /// A drag started or ended.
    ///
    /// Camera controls are paused for the duration of the drag. At drag end
    /// the member offsets are re-measured, since a group rotation moves
    /// members without moving the pivot.
    pub fn dragging_changed<S>(
        &mut self,
        dragging: bool,
        selection: &mut Selection,
        scene: &S,
        camera_controls: Option<&SharedCameraControls>,
    ) where
        S: SceneGraph + ?Sized,
    {
        tracing::debug!("Gizmo dragging: {}", dragging);
        self.dragging = dragging;

        if let Some(controls) = camera_controls {
            controls.lock().set_enabled(!dragging);
        }

        if dragging {
            self.snapshot = Some(Self::capture(selection, scene));
        } else {
            self.snapshot = None;
            selection.recapture_offsets(scene);
        }
    }

    /// The gizmo produced a new pivot transform.
    ///
    /// Returns false when the tick was skipped because a group rotation had
    /// no axis/angle to work with yet.
    pub fn object_changed<S>(
        &mut self,
        new_pivot: Transform,
        mode: GizmoMode,
        axis_and_angle: Option<(Vec3, f32)>,
        config: &Config,
        selection: &mut Selection,
        scene: &mut S,
    ) -> bool
    where
        S: SceneGraph + ?Sized,
    {
        match mode {
            GizmoMode::Translate => {
                let mut pivot = *selection.pivot();
                pivot.position = new_pivot.position;
                selection.set_pivot(pivot);

                for member in selection.members() {
                    if let Some(mut local) = scene.local_transform(member.id) {
                        local.position = member.offset + pivot.position;
                        scene.set_local_transform(member.id, local);
                    }
                }
            }
            GizmoMode::Rotate if config.rotate_as_group => {
                let Some((axis, angle)) = axis_and_angle else {
                    return false;
                };
                let axis = axis.normalize_or_zero();
                if axis == Vec3::ZERO {
                    return false;
                }

                let snapshot = self
                    .snapshot
                    .get_or_insert_with(|| Self::capture(selection, &*scene));

                let pivot_point = snapshot.pivot;
                let orbit = Mat4::from_translation(pivot_point)
                    * Mat4::from_quat(Quat::from_axis_angle(axis, angle))
                    * Mat4::from_translation(-pivot_point);

                // Each tick restarts from the drag-start pose
                for (id, start) in &snapshot.transforms {
                    scene.set_local_transform(*id, *start);
                    scene.apply_matrix(*id, orbit);
                }

                let mut pivot = *selection.pivot();
                pivot.rotation = new_pivot.rotation;
                selection.set_pivot(pivot);
            }
            GizmoMode::Rotate => {
                let mut pivot = *selection.pivot();
                pivot.rotation = new_pivot.rotation;
                selection.set_pivot(pivot);

                // Every object spins in place about its own origin
                for member in selection.members() {
                    if let Some(mut local) = scene.local_transform(member.id) {
                        local.rotation = pivot.rotation;
                        scene.set_local_transform(member.id, local);
                    }
                }
            }
            GizmoMode::Scale => {
                let mut pivot = *selection.pivot();
                pivot.scale = new_pivot.scale;
                selection.set_pivot(pivot);

                for member in selection.members() {
                    if let Some(mut local) = scene.local_transform(member.id) {
                        local.scale = pivot.scale;
                        scene.set_local_transform(member.id, local);
                    }
                }
            }
        }

        if config.update_local_matrices || config.update_world_matrices {
            for id in selection.ids() {
                if config.update_local_matrices {
                    scene.update_local_matrix(id);
                }
                if config.update_world_matrices {
                    scene.update_world_matrix(id);
                }
            }
        }
        true
    }

    fn capture<S>(selection: &Selection, scene: &S) -> DragSnapshot
    where
        S: SceneGraph + ?Sized,
    {
        DragSnapshot {
            pivot: selection.pivot().position,
            transforms: selection
                .ids()
                .filter_map(|id| scene.local_transform(id).map(|t| (id, t)))
                .collect(),
        }
    }
}
