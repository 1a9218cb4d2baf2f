//! Game state contract used by the search engines.
//!
//! Engines only ever see positions through this trait. Implementations must be
//! immutable snapshots: `forecast_move` returns a new state and leaves `self`
//! untouched, and `legal_moves` must enumerate in a fixed order since every
//! tie-break in the search depends on it.

use super::board::Board;
use super::r#move::Move;
use super::types::PlayerId;
use crate::logic;

pub trait GameState: Clone {
    /// Side to move.
    fn active_player(&self) -> PlayerId;

    fn opponent(&self, player: PlayerId) -> PlayerId {
        player.opponent()
    }

    /// Legal moves for the side to move.
    fn legal_moves(&self) -> Vec<Move> {
        self.legal_moves_for(self.active_player())
    }

    fn legal_moves_for(&self, player: PlayerId) -> Vec<Move>;

    /// Applies `mv` for the side to move on a copy.
    fn forecast_move(&self, mv: Move) -> Self;

    /// `+inf` if `player` has won, `-inf` if it has lost, `0.0` while the game goes on.
    fn utility(&self, player: PlayerId) -> f64;

    fn move_count(&self) -> usize;

    fn blank_spaces(&self) -> Vec<Move>;

    /// Upper bound on the plies left in the game. Iterative deepening stops
    /// once it has searched this deep.
    ///
    /// Every move fills a blank cell, so the blank count bounds it by default.
    /// States whose moves do not consume cells must override this.
    fn remaining_plies(&self) -> usize {
        self.blank_spaces().len()
    }

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn center(&self) -> Move {
        Move::new((self.height() / 2) as i32, (self.width() / 2) as i32)
    }
}

impl GameState for Board {
    fn active_player(&self) -> PlayerId {
        self.active_player
    }

    fn legal_moves_for(&self, player: PlayerId) -> Vec<Move> {
        logic::legal_moves(self, player)
    }

    fn forecast_move(&self, mv: Move) -> Self {
        logic::apply_move(self, mv)
    }

    fn utility(&self, player: PlayerId) -> f64 {
        if logic::is_winner(self, player) {
            f64::INFINITY
        } else if logic::is_loser(self, player) {
            f64::NEG_INFINITY
        } else {
            0.0
        }
    }

    fn move_count(&self) -> usize {
        self.move_count
    }

    fn blank_spaces(&self) -> Vec<Move> {
        Board::blank_spaces(self)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_does_not_mutate() {
        let board = Board::new(7, 7);
        let next = board.forecast_move(Move::new(3, 3));
        assert_eq!(board.move_count(), 0);
        assert_eq!(next.move_count(), 1);
        assert!(board.is_blank(Move::new(3, 3)));
        assert_eq!(next.active_player(), PlayerId::Player2);
    }

    #[test]
    fn test_center() {
        assert_eq!(Board::new(7, 7).center(), Move::new(3, 3));
        assert_eq!(Board::new(5, 4).center(), Move::new(2, 2));
    }

    #[test]
    fn test_utility_of_stuck_player() {
        let mut board = Board::new(3, 3);
        // 中央のマスからはナイトの移動先が存在しない
        board.place_player(PlayerId::Player1, Move::new(1, 1));
        board.place_player(PlayerId::Player2, Move::new(0, 0));
        assert_eq!(board.utility(PlayerId::Player1), f64::NEG_INFINITY);
        assert_eq!(board.utility(PlayerId::Player2), f64::INFINITY);
    }

    #[test]
    fn test_remaining_plies_counts_blanks() {
        let mut board = Board::new(5, 5);
        assert_eq!(board.remaining_plies(), 25);
        board.apply_move_mut(Move::new(2, 2));
        board.block_cell(Move::new(0, 0));
        assert_eq!(board.remaining_plies(), 23);
    }

    #[test]
    fn test_utility_ongoing() {
        let board = Board::new(7, 7);
        assert_eq!(board.utility(PlayerId::Player1), 0.0);
        assert_eq!(board.utility(PlayerId::Player2), 0.0);
    }
}
