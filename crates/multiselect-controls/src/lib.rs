//! Multi-select controls
//!
//! Pointer-driven selection of scene objects with a shared transform pivot:
//! - [`MultiSelect`] - the controller wiring surface input to the selection
//! - [`Action`] / [`Bindings`] - what each button or touch count does
//! - [`Selection`] - selected objects and the group pivot
//! - [`TransformGizmo`] / [`CameraControls`] - external widgets the controls drive
//! - [`Config`] - RON-backed settings

pub mod action;
pub mod bindings;
pub mod bridge;
pub mod config;
pub mod controller;
pub mod events;
pub mod gizmo;
pub mod input;
pub mod raycaster;
pub mod selection;
pub mod surface;

pub use action::{Action, Intent};
pub use bindings::{Bindings, MouseBindings, TouchBindings};
pub use bridge::GizmoBridge;
pub use config::{Config, ConfigError, ConfigUpdate};
pub use controller::{MultiSelect, SharedSelectables, shared_selectables};
pub use events::{EventKind, ListenerId, Listeners, SelectionEvent};
pub use gizmo::{
    CameraControls, GizmoEvent, GizmoMode, HeadlessGizmo, SharedCameraControls, TransformGizmo,
};
pub use input::{MouseButton, PointerEvent, PointerRecord, PointerTracker, PointerType, SurfaceRect};
pub use raycaster::{Intersection, Raycaster};
pub use selection::{SelectedObject, Selection};
pub use surface::{FixedSurface, Surface, SurfaceEvent, SurfaceEventKind};
