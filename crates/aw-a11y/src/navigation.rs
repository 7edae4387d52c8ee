//! Directional navigation
//!
//! Maps arrow keys (and Home/End) to an index within a list of items.

use aw_dom::Key;

use crate::Orientation;

/// Movement requested by a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
    First,
    Last,
}

impl Direction {
    /// Direction for `key`, or `None` when the key does not navigate along
    /// `orientation`
    pub fn from_key(key: &Key, orientation: Orientation) -> Option<Self> {
        Some(match (key, orientation) {
            (Key::Home, _) => Self::First,
            (Key::End, _) => Self::Last,
            (Key::ArrowUp, Orientation::Vertical) | (Key::ArrowLeft, Orientation::Horizontal) => {
                Self::Previous
            }
            (Key::ArrowDown, Orientation::Vertical)
            | (Key::ArrowRight, Orientation::Horizontal) => Self::Next,
            _ => return None,
        })
    }

    /// Apply this direction to `current` within `0..=last`
    pub fn apply(&self, current: usize, last: usize, cycle: bool) -> usize {
        let current = current.min(last);
        match self {
            Self::First => 0,
            Self::Last => last,
            Self::Previous if current == 0 => {
                if cycle {
                    last
                } else {
                    0
                }
            }
            Self::Previous => current - 1,
            Self::Next if current == last => {
                if cycle {
                    0
                } else {
                    last
                }
            }
            Self::Next => current + 1,
        }
    }
}

/// Index `key` moves to from `current`, or `None` if the key is unrelated
pub fn next_index(
    key: &Key,
    orientation: Orientation,
    current: usize,
    last: usize,
    cycle: bool,
) -> Option<usize> {
    Direction::from_key(key, orientation).map(|direction| direction.apply(current, last, cycle))
}
