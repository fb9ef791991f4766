//! Interaction state machines for the explorer.
//!
//! - [`InputMode`]: whether keystrokes go to the search field
//! - [`DropdownState`]: region dropdown, closed or open with a keyboard cursor
//! - [`ModalState`]: detail modal, closed or showing one country
//!
//! The dropdown and the modal are independent, but only one of them accepts
//! input at a time: while the modal is open, every input is routed to it.

use crate::domain::{Country, Region};

/// Current input handling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and command keys.
    #[default]
    Normal,

    /// Characters are typed into the search field.
    Search,
}

/// Region dropdown state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropdownState {
    #[default]
    Closed,
    /// Open with the keyboard cursor on `Region::ALL[cursor]`.
    Open { cursor: usize },
}

impl DropdownState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Region under the keyboard cursor, if open.
    #[must_use]
    pub fn cursor_region(self) -> Option<Region> {
        match self {
            Self::Open { cursor } => Region::ALL.get(cursor).copied(),
            Self::Closed => None,
        }
    }

    /// Moves the cursor by `delta` options, wrapping around.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn moved(self, delta: isize) -> Self {
        match self {
            Self::Open { cursor } => {
                let len = Region::ALL.len();
                let step = delta.rem_euclid(len as isize) as usize;
                Self::Open { cursor: (cursor + step) % len }
            }
            Self::Closed => Self::Closed,
        }
    }
}

/// Detail modal state.
///
/// The open modal owns its own copy of the record, so later list updates
/// cannot change what it shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(Box<Country>),
}

impl ModalState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    #[must_use]
    pub fn country(&self) -> Option<&Country> {
        match self {
            Self::Open(country) => Some(country),
            Self::Closed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropdown_cursor_wraps() {
        let open = DropdownState::Open { cursor: 0 };
        assert_eq!(open.moved(-1).cursor_region(), Some(Region::Oceania));
        assert_eq!(open.moved(1).moved(1).cursor_region(), Some(Region::Asia));
        assert_eq!(DropdownState::Closed.moved(1), DropdownState::Closed);
    }

    #[test]
    fn modal_exposes_its_record() {
        let country = Country {
            name: "Chile".into(),
            ..Country::default()
        };
        let modal = ModalState::Open(Box::new(country));
        assert!(modal.is_open());
        assert_eq!(modal.country().map(|c| c.name.as_str()), Some("Chile"));
        assert!(ModalState::Closed.country().is_none());
    }
}
