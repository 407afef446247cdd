//! Pointer input normalization.
//!
//! Raw pointer events are reduced to [`PointerRecord`]s tracked by id; the
//! number of live records is what touch bindings are keyed on.

use glam::Vec2;

/// Mouse buttons as reported in a pointer event's `buttons` bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Bit of this button inside `PointerEvent::buttons`
    pub const fn mask(self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        }
    }
}

/// Device that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// A pointer event delivered by the host surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: i32,
    pub pointer_type: PointerType,
    /// Position in surface client coordinates (pixels)
    pub client_x: f32,
    pub client_y: f32,
    /// Currently pressed buttons, see [`MouseButton::mask`]
    pub buttons: u8,
}

impl PointerEvent {
    pub fn mouse(pointer_id: i32, client_x: f32, client_y: f32, buttons: u8) -> Self {
        Self {
            pointer_id,
            pointer_type: PointerType::Mouse,
            client_x,
            client_y,
            buttons,
        }
    }

    pub fn touch(pointer_id: i32, client_x: f32, client_y: f32) -> Self {
        Self {
            pointer_id,
            pointer_type: PointerType::Touch,
            client_x,
            client_y,
            buttons: MouseButton::Left.mask(),
        }
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons & button.mask() == button.mask()
    }

    /// The originating mouse button: the first pressed of left, middle, right.
    /// Always None for non-mouse pointers.
    pub fn mouse_button(&self) -> Option<MouseButton> {
        if self.pointer_type != PointerType::Mouse {
            return None;
        }
        [MouseButton::Left, MouseButton::Middle, MouseButton::Right]
            .into_iter()
            .find(|b| self.is_pressed(*b))
    }
}

/// A pointer currently held down on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRecord {
    pub pointer_id: i32,
    pub client_x: f32,
    pub client_y: f32,
    pub delta_x: f32,
    pub delta_y: f32,
    pub mouse_button: Option<MouseButton>,
}

/// Set of active pointers, in press order
#[derive(Debug, Default)]
pub struct PointerTracker {
    active: Vec<PointerRecord>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly pressed pointer and return the active count.
    ///
    /// A stale record for the same mouse button is dropped first; emulated
    /// mouse buttons can be pressed again without ever being released.
    pub fn press(&mut self, event: &PointerEvent) -> usize {
        let mouse_button = event.mouse_button();
        if let Some(button) = mouse_button
            && let Some(stale) = self
                .active
                .iter()
                .position(|p| p.mouse_button == Some(button))
        {
            tracing::debug!(
                "Dropping stale pointer {} for {:?}",
                self.active[stale].pointer_id,
                button
            );
            self.active.remove(stale);
        }

        self.active.push(PointerRecord {
            pointer_id: event.pointer_id,
            client_x: event.client_x,
            client_y: event.client_y,
            delta_x: 0.0,
            delta_y: 0.0,
            mouse_button,
        });
        self.active.len()
    }

    /// Stop tracking a pointer; None if it was never tracked
    pub fn release(&mut self, pointer_id: i32) -> Option<PointerRecord> {
        let index = self.active.iter().position(|p| p.pointer_id == pointer_id)?;
        Some(self.active.remove(index))
    }

    /// Update position and delta of a tracked pointer
    pub fn track_move(&mut self, event: &PointerEvent) {
        if let Some(record) = self
            .active
            .iter_mut()
            .find(|p| p.pointer_id == event.pointer_id)
        {
            record.delta_x = event.client_x - record.client_x;
            record.delta_y = event.client_y - record.client_y;
            record.client_x = event.client_x;
            record.client_y = event.client_y;
        }
    }

    pub fn get(&self, pointer_id: i32) -> Option<&PointerRecord> {
        self.active.iter().find(|p| p.pointer_id == pointer_id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointerRecord> {
        self.active.iter()
    }
}

/// Bounding box of the host surface in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Normalized device coordinates of a client position (+y up).
    /// None for a collapsed surface.
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            ((client_x - self.left) / self.width) * 2.0 - 1.0,
            -((client_y - self.top) / self.height) * 2.0 + 1.0,
        ))
    }

    /// Client position of an NDC point, the inverse of [`Self::to_ndc`]
    pub fn from_ndc(&self, ndc: Vec2) -> (f32, f32) {
        (
            self.left + (ndc.x + 1.0) * 0.5 * self.width,
            self.top + (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}
