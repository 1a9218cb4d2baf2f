use serde::{Deserialize, Serialize};
use std::fmt;

/// 指し手: 移動先のセル (row, col)
///
/// `Move::NONE` (-1, -1) は「合法手なし」を表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: i32,
    pub col: i32,
}

impl Move {
    pub const NONE: Move = Move { row: -1, col: -1 };

    pub fn new(row: i32, col: i32) -> Self {
        Move { row, col }
    }

    pub fn is_none(&self) -> bool {
        *self == Move::NONE
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NONE
    }
}

impl From<(i32, i32)> for Move {
    fn from((row, col): (i32, i32)) -> Self {
        Move::new(row, col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
