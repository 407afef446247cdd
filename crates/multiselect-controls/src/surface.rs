//! The host surface the controls listen on

use crate::input::{PointerEvent, SurfaceRect};

/// Events the controls subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceEventKind {
    ContextMenu,
    PointerDown,
    PointerUp,
    PointerMove,
}

impl SurfaceEventKind {
    /// Everything the controls listen for, registered and removed as one unit
    pub const ALL: [SurfaceEventKind; 4] = [
        SurfaceEventKind::ContextMenu,
        SurfaceEventKind::PointerDown,
        SurfaceEventKind::PointerUp,
        SurfaceEventKind::PointerMove,
    ];
}

/// An event delivered by the host surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    ContextMenu,
    PointerDown(PointerEvent),
    PointerUp(PointerEvent),
    PointerMove(PointerEvent),
}

impl SurfaceEvent {
    pub fn kind(&self) -> SurfaceEventKind {
        match self {
            SurfaceEvent::ContextMenu => SurfaceEventKind::ContextMenu,
            SurfaceEvent::PointerDown(_) => SurfaceEventKind::PointerDown,
            SurfaceEvent::PointerUp(_) => SurfaceEventKind::PointerUp,
            SurfaceEvent::PointerMove(_) => SurfaceEventKind::PointerMove,
        }
    }
}

/// Element that delivers pointer events and reports its client rectangle
pub trait Surface {
    /// Current bounding box in client coordinates.
    fn bounding_rect(&self) -> SurfaceRect;

    /// Start delivering the given event kinds to the controls.
    fn add_listeners(&mut self, kinds: &[SurfaceEventKind]);

    /// Stop delivering the given event kinds.
    fn remove_listeners(&mut self, kinds: &[SurfaceEventKind]);
}

/// A surface with a fixed rectangle that only records its subscriptions
#[derive(Debug, Clone)]
pub struct FixedSurface {
    rect: SurfaceRect,
    listening: Vec<SurfaceEventKind>,
}

impl FixedSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            rect: SurfaceRect::new(0.0, 0.0, width, height),
            listening: Vec::new(),
        }
    }

    pub fn set_rect(&mut self, rect: SurfaceRect) {
        self.rect = rect;
    }

    pub fn is_listening(&self, kind: SurfaceEventKind) -> bool {
        self.listening.contains(&kind)
    }
}

impl Surface for FixedSurface {
    fn bounding_rect(&self) -> SurfaceRect {
        self.rect
    }

    fn add_listeners(&mut self, kinds: &[SurfaceEventKind]) {
        for kind in kinds {
            if !self.listening.contains(kind) {
                self.listening.push(*kind);
            }
        }
    }

    fn remove_listeners(&mut self, kinds: &[SurfaceEventKind]) {
        self.listening.retain(|k| !kinds.contains(k));
    }
}
