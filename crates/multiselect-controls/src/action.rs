//! Selection actions and how an OR'd mask turns into one decision

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Bitmask of requested selection actions
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Action(u8);

impl Action {
    pub const NONE: Self = Self(0);
    pub const SELECT: Self = Self(1);
    pub const MULTI_SELECT: Self = Self(2);
    pub const DESELECT: Self = Self(4);
    pub const TOGGLE: Self = Self(8);

    const ALL: u8 = 1 | 2 | 4 | 8;

    /// Build from raw bits, dropping unknown ones
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    /// Collapse the mask into a single decision.
    ///
    /// Precedence: SELECT or MULTI_SELECT, then TOGGLE, then DESELECT.
    pub fn intent(self) -> Option<Intent> {
        if self.contains(Self::SELECT) || self.contains(Self::MULTI_SELECT) {
            Some(Intent::Select)
        } else if self.contains(Self::TOGGLE) {
            Some(Intent::Toggle)
        } else if self.contains(Self::DESELECT) {
            Some(Intent::Deselect)
        } else {
            None
        }
    }
}

impl From<u8> for Action {
    fn from(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl From<Action> for u8 {
    fn from(action: Action) -> Self {
        action.0
    }
}

impl BitOr for Action {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Action {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "NONE");
        }
        let names = [
            (Self::SELECT, "SELECT"),
            (Self::MULTI_SELECT, "MULTI_SELECT"),
            (Self::DESELECT, "DESELECT"),
            (Self::TOGGLE, "TOGGLE"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// What a completed gesture does to the hit object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Add the hit object; no-op if it is already selected
    Select,
    /// Remove the hit object; no-op if it is not selected
    Deselect,
    /// Flip the hit object's membership
    Toggle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_combines_flags() {
        let mask = Action::SELECT | Action::DESELECT;
        assert_eq!(mask.bits(), 5);
        assert!(mask.contains(Action::SELECT));
        assert!(mask.contains(Action::DESELECT));
        assert!(!mask.contains(Action::TOGGLE));
        assert_eq!(format!("{:?}", mask), "SELECT|DESELECT");
    }

    #[test]
    fn test_none_contains_nothing() {
        assert!(!Action::NONE.contains(Action::NONE));
        assert_eq!(Action::NONE.intent(), None);
        assert_eq!(format!("{:?}", Action::NONE), "NONE");
    }

    #[test]
    fn test_intent_precedence() {
        assert_eq!(Action::SELECT.intent(), Some(Intent::Select));
        assert_eq!(Action::MULTI_SELECT.intent(), Some(Intent::Select));
        assert_eq!(Action::DESELECT.intent(), Some(Intent::Deselect));
        assert_eq!(Action::TOGGLE.intent(), Some(Intent::Toggle));
        assert_eq!(
            (Action::SELECT | Action::DESELECT).intent(),
            Some(Intent::Select)
        );
        assert_eq!(
            (Action::TOGGLE | Action::DESELECT).intent(),
            Some(Intent::Toggle)
        );
    }

    #[test]
    fn test_unknown_bits_are_dropped() {
        assert_eq!(Action::from_bits_truncate(0xff).bits(), 15);
    }
}
