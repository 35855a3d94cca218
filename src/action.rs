#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use bevy_math::IVec2;

pub const LEFT: IVec2 = IVec2 { x: -1, y: 0 };
pub const UP: IVec2 = IVec2 { x: 0, y: -1 };
pub const RIGHT: IVec2 = IVec2 { x: 1, y: 0 };
pub const DOWN: IVec2 = IVec2 { x: 0, y: 1 };

/// A unit move on the grid. Rows grow downward, so [Action::Up] decreases
/// the row coordinate.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left = 0,
    Up = 1,
    Right = 2,
    Down = 3,
}

impl Action {
    /// All actions, in the fixed scan order used by the searchers.
    pub const ALL: [Action; 4] = [Action::Left, Action::Up, Action::Right, Action::Down];

    /// Returns the unit displacement `(dcol, drow)` for this action.
    #[inline]
    #[must_use]
    pub fn unit(&self) -> IVec2 {
        match self {
            Action::Left => LEFT,
            Action::Up => UP,
            Action::Right => RIGHT,
            Action::Down => DOWN,
        }
    }

    /// Move a cell one step in this direction.
    #[inline]
    #[must_use]
    pub fn apply(&self, cell: IVec2) -> IVec2 {
        cell + self.unit()
    }

    /// The Q-table column index of this action.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        *self as usize
    }

    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Action::Left,
            1 => Action::Up,
            2 => Action::Right,
            _ => Action::Down,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bevy_math::ivec2;

    #[test]
    fn test_scan_order() {
        assert_eq!(
            Action::ALL,
            [Action::Left, Action::Up, Action::Right, Action::Down]
        );
        assert_eq!(
            Action::ALL.map(|a| a.unit()),
            [LEFT, UP, RIGHT, DOWN]
        );
    }

    #[test]
    fn test_index_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_index(action.index()), action);
        }
        assert_eq!(Action::from_index(7), Action::Down);
    }

    #[test]
    fn test_apply() {
        let cell = ivec2(3, 3);
        assert_eq!(Action::Left.apply(cell), ivec2(2, 3));
        assert_eq!(Action::Up.apply(cell), ivec2(3, 2));
        assert_eq!(Action::Right.apply(cell), ivec2(4, 3));
        assert_eq!(Action::Down.apply(cell), ivec2(3, 4));
    }
}
