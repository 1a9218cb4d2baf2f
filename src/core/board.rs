use super::r#move::Move;
use super::types::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 7;

/// Isolation の盤面
///
/// 一度踏んだセルは以後ずっと塞がったままになる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    /// 塞がったセル (row-major)
    blocked: Vec<bool>,
    /// 各プレイヤーの現在位置 (未配置なら None)
    locations: [Option<Move>; 2],
    pub active_player: PlayerId,
    pub move_count: usize,
}

impl Default for Board {
    fn default() -> Self {
        Board::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            blocked: vec![false; width * height],
            locations: [None, None],
            active_player: PlayerId::Player1,
            move_count: 0,
        }
    }

    fn index(&self, cell: Move) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.row as usize * self.width + cell.col as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, cell: Move) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.height
            && (cell.col as usize) < self.width
    }

    pub fn is_blank(&self, cell: Move) -> bool {
        self.index(cell).map(|i| !self.blocked[i]).unwrap_or(false)
    }

    pub fn location(&self, player: PlayerId) -> Option<Move> {
        self.locations[player.index()]
    }

    /// 空きセル (row-major 順)
    pub fn blank_spaces(&self) -> Vec<Move> {
        let mut cells = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = Move::new(row as i32, col as i32);
                if self.is_blank(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Setup helper: blocks a cell without counting it as a move.
    pub fn block_cell(&mut self, cell: Move) {
        if let Some(i) = self.index(cell) {
            self.blocked[i] = true;
        }
    }

    /// Setup helper: puts `player` on `cell` without counting it as a move.
    pub fn place_player(&mut self, player: PlayerId, cell: Move) {
        self.block_cell(cell);
        self.locations[player.index()] = Some(cell);
    }

    /// 手番プレイヤーを `cell` に移動させ、手番を交代する。
    /// 合法性はチェックしない (呼び出し側の責任)。
    pub fn apply_move_mut(&mut self, cell: Move) {
        let player = self.active_player;
        self.place_player(player, cell);
        self.active_player = player.opponent();
        self.move_count += 1;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = Move::new(row as i32, col as i32);
                let symbol = if self.location(PlayerId::Player1) == Some(cell) {
                    '1'
                } else if self.location(PlayerId::Player2) == Some(cell) {
                    '2'
                } else if self.is_blank(cell) {
                    '.'
                } else {
                    '-'
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_blank() {
        let board = Board::new(7, 7);
        assert_eq!(board.blank_spaces().len(), 49);
        assert_eq!(board.active_player, PlayerId::Player1);
        assert_eq!(board.move_count, 0);
    }

    #[test]
    fn test_apply_move_blocks_and_swaps_turn() {
        let mut board = Board::new(5, 5);
        board.apply_move_mut(Move::new(2, 2));
        assert!(!board.is_blank(Move::new(2, 2)));
        assert_eq!(board.location(PlayerId::Player1), Some(Move::new(2, 2)));
        assert_eq!(board.active_player, PlayerId::Player2);
        assert_eq!(board.move_count, 1);
    }

    #[test]
    fn test_setup_helpers_do_not_count_moves() {
        let mut board = Board::new(5, 5);
        board.block_cell(Move::new(0, 0));
        board.place_player(PlayerId::Player2, Move::new(4, 4));
        assert_eq!(board.move_count, 0);
        assert_eq!(board.blank_spaces().len(), 23);
        // 盤外は無視
        board.block_cell(Move::new(9, 9));
        assert_eq!(board.blank_spaces().len(), 23);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3, 2);
        board.place_player(PlayerId::Player1, Move::new(0, 0));
        board.place_player(PlayerId::Player2, Move::new(1, 2));
        board.block_cell(Move::new(0, 1));
        assert_eq!(board.to_string(), "1 - .\n. . 2\n");
    }
}
