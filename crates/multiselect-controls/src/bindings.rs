//! Input bindings and action resolution

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::input::{MouseButton, PointerEvent, PointerType};

/// Action bound to each mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseBindings {
    pub left: Action,
    pub middle: Action,
    pub right: Action,
    /// Reserved; the wheel never triggers a selection gesture
    pub wheel: Action,
}

impl Default for MouseBindings {
    fn default() -> Self {
        Self {
            left: Action::SELECT,
            middle: Action::NONE,
            right: Action::DESELECT,
            wheel: Action::NONE,
        }
    }
}

impl MouseBindings {
    pub fn get(&self, button: MouseButton) -> Action {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }
}

/// Action bound to each simultaneous touch count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchBindings {
    pub one: Action,
    pub two: Action,
    pub three: Action,
}

impl Default for TouchBindings {
    fn default() -> Self {
        Self {
            one: Action::TOGGLE,
            two: Action::NONE,
            three: Action::NONE,
        }
    }
}

impl TouchBindings {
    /// Binding for `count` simultaneous touches; NONE beyond three
    pub fn get(&self, count: usize) -> Action {
        match count {
            1 => self.one,
            2 => self.two,
            3 => self.three,
            _ => Action::NONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Bindings {
    pub mouse: MouseBindings,
    pub touch: TouchBindings,
}

impl Bindings {
    /// Resolve the action requested by a pointer-down.
    ///
    /// Mouse and pen input OR together the bindings of every pressed button;
    /// touch input uses the binding for the number of active pointers.
    pub fn resolve(&self, event: &PointerEvent, active_pointers: usize) -> Action {
        match event.pointer_type {
            PointerType::Touch => self.touch.get(active_pointers),
            PointerType::Mouse | PointerType::Pen => {
                [MouseButton::Left, MouseButton::Middle, MouseButton::Right]
                    .into_iter()
                    .filter(|b| event.is_pressed(*b))
                    .fold(Action::NONE, |state, b| state | self.mouse.get(b))
            }
        }
    }
}
