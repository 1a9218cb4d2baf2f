//! # Evaluation Strategies
//!
//! Leaf evaluators for the search engines. Every strategy first asks the state
//! for its terminal utility and returns it untouched when the game is decided,
//! so a win is always `+inf` and a loss always `-inf` regardless of the
//! heuristic in use.
//!
//! ## Strategies
//! 1. **OpenMoves**: own mobility.
//! 2. **MobilityRatio**: own mobility divided by `1 + opponent mobility`.
//! 3. **LateGameMobility**: ratio early, raw mobility once the board fills up.
//! 4. **ForcedLoss**: spots an opponent that only has a suicidal move left.
//! 5. **WeightedMobility**: mobility scaled by how cramped the opponent is.
//! 6. **Aggression**: phase switch on open cells, chasing the opponent mid-game.
//!
//! The thresholds are policy, not tuned constants.

use super::evaluator::Evaluator;
use crate::core::{GameState, PlayerId};

fn mobility<S: GameState>(state: &S, player: PlayerId) -> (f64, f64) {
    let own = state.legal_moves_for(player).len() as f64;
    let opp = state.legal_moves_for(state.opponent(player)).len() as f64;
    (own, opp)
}

fn terminal<S: GameState>(state: &S, player: PlayerId) -> Option<f64> {
    let utility = state.utility(player);
    if utility != 0.0 {
        Some(utility)
    } else {
        None
    }
}

fn filled_fraction<S: GameState>(state: &S) -> f64 {
    state.move_count() as f64 / (state.width() * state.height()) as f64
}

/// Own legal-move count.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenMoves;

impl<S: GameState> Evaluator<S> for OpenMoves {
    fn evaluate(&self, state: &S, player: PlayerId) -> f64 {
        if let Some(utility) = terminal(state, player) {
            return utility;
        }
        state.legal_moves_for(player).len() as f64
    }

    fn name(&self) -> &str {
        "open_moves"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MobilityRatio;

impl<S: GameState> Evaluator<S> for MobilityRatio {
    fn evaluate(&self, state: &S, player: PlayerId) -> f64 {
        if let Some(utility) = terminal(state, player) {
            return utility;
        }
        let (own, opp) = mobility(state, player);
        own / (1.0 + opp)
    }

    fn name(&self) -> &str {
        "mobility_ratio"
    }
}

/// Ratio while the board is open, raw mobility once `late_fraction` of the
/// cells have been played (survival matters more than cornering by then).
#[derive(Debug, Clone, Copy)]
pub struct LateGameMobility {
    pub late_fraction: f64,
}

impl Default for LateGameMobility {
    fn default() -> Self {
        Self { late_fraction: 0.8 }
    }
}

impl<S: GameState> Evaluator<S> for LateGameMobility {
    fn evaluate(&self, state: &S, player: PlayerId) -> f64 {
        if let Some(utility) = terminal(state, player) {
            return utility;
        }
        let (own, opp) = mobility(state, player);
        if filled_fraction(state) > self.late_fraction {
            own
        } else {
            own / (1.0 + opp)
        }
    }

    fn name(&self) -> &str {
        "late_game_mobility"
    }
}

/// Looks one ply ahead when the opponent is on move with a single legal move.
///
/// If that move leaves the opponent stranded while `player` can still move,
/// the position is a forced win.
#[derive(Debug, Clone, Copy)]
pub struct ForcedLoss {
    pub late_fraction: f64,
}

impl Default for ForcedLoss {
    fn default() -> Self {
        Self { late_fraction: 0.7 }
    }
}

impl ForcedLoss {
    fn is_forced_loss<S: GameState>(state: &S, player: PlayerId) -> bool {
        let opponent = state.opponent(player);
        // 相手の手番でなければ相手の手は強制されない
        if state.active_player() != opponent {
            return false;
        }
        let opponent_moves = state.legal_moves_for(opponent);
        if opponent_moves.len() != 1 {
            return false;
        }
        let next = state.forecast_move(opponent_moves[0]);
        next.legal_moves_for(opponent).is_empty() && !next.legal_moves_for(player).is_empty()
    }
}

impl<S: GameState> Evaluator<S> for ForcedLoss {
    fn evaluate(&self, state: &S, player: PlayerId) -> f64 {
        if let Some(utility) = terminal(state, player) {
            return utility;
        }
        if Self::is_forced_loss(state, player) {
            return f64::INFINITY;
        }
        let (own, opp) = mobility(state, player);
        if filled_fraction(state) > self.late_fraction {
            own / (1.0 + opp)
        } else {
            own
        }
    }

    fn name(&self) -> &str {
        "forced_loss"
    }
}

/// `own * (1 + k / (1 + opp))`: a cramped opponent is worth a lot while the
/// board is open (`k = 8`) and little in the end game (`k = 1`).
#[derive(Debug, Clone, Copy)]
pub struct WeightedMobility {
    pub endgame_blanks: usize,
}

impl Default for WeightedMobility {
    fn default() -> Self {
        Self { endgame_blanks: 10 }
    }
}

impl<S: GameState> Evaluator<S> for WeightedMobility {
    fn evaluate(&self, state: &S, player: PlayerId) -> f64 {
        if let Some(utility) = terminal(state, player) {
            return utility;
        }
        let (own, opp) = mobility(state, player);
        let weight = if state.blank_spaces().len() < self.endgame_blanks {
            1.0
        } else {
            8.0
        };
        own * (1.0 + weight / (1.0 + opp))
    }

    fn name(&self) -> &str {
        "weighted_mobility"
    }
}

/// Open cells decide the phase: keep options open early, chase the opponent
/// mid-game (`own - 4 * opp`), survive late.
#[derive(Debug, Clone, Copy)]
pub struct Aggression {
    pub opening_blanks: usize,
    pub endgame_blanks: usize,
}

impl Default for Aggression {
    fn default() -> Self {
        Self {
            opening_blanks: 40,
            endgame_blanks: 10,
        }
    }
}

impl<S: GameState> Evaluator<S> for Aggression {
    fn evaluate(&self, state: &S, player: PlayerId) -> f64 {
        if let Some(utility) = terminal(state, player) {
            return utility;
        }
        let blanks = state.blank_spaces().len();
        let (own, opp) = mobility(state, player);
        if blanks > self.opening_blanks || blanks <= self.endgame_blanks {
            own
        } else {
            own - 4.0 * opp
        }
    }

    fn name(&self) -> &str {
        "aggression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Move};
    use crate::player::ai::evaluator::EvaluatorKind;

    const ALL_KINDS: [EvaluatorKind; 6] = [
        EvaluatorKind::OpenMoves,
        EvaluatorKind::MobilityRatio,
        EvaluatorKind::LateGameMobility,
        EvaluatorKind::ForcedLoss,
        EvaluatorKind::WeightedMobility,
        EvaluatorKind::Aggression,
    ];

    /// Player1 is on move and stuck in the corner.
    fn decided_board() -> Board {
        let mut board = Board::new(7, 7);
        board.place_player(PlayerId::Player1, Move::new(0, 0));
        board.place_player(PlayerId::Player2, Move::new(6, 6));
        board.block_cell(Move::new(1, 2));
        board.block_cell(Move::new(2, 1));
        board
    }

    /// Player2 is on move with a single escape square that leads nowhere.
    fn forced_loss_board() -> Board {
        let mut board = Board::new(7, 7);
        board.place_player(PlayerId::Player1, Move::new(0, 0));
        board.place_player(PlayerId::Player2, Move::new(6, 6));
        board.active_player = PlayerId::Player2;
        // (6,6) からは (4,5) だけ残す
        board.block_cell(Move::new(5, 4));
        // (4,5) からの移動先を全て塞ぐ
        for cell in [(2, 4), (2, 6), (3, 3), (5, 3), (6, 4)] {
            board.block_cell(Move::from(cell));
        }
        board
    }

    #[test]
    fn test_terminal_utility_is_exact() {
        let board = decided_board();
        for kind in ALL_KINDS {
            let eval = kind.build::<Board>();
            assert_eq!(
                eval.evaluate(&board, PlayerId::Player1),
                f64::NEG_INFINITY,
                "{}",
                eval.name()
            );
            assert_eq!(
                eval.evaluate(&board, PlayerId::Player2),
                f64::INFINITY,
                "{}",
                eval.name()
            );
        }
    }

    #[test]
    fn test_mobility_ratio() {
        let mut board = Board::new(7, 7);
        board.place_player(PlayerId::Player1, Move::new(3, 3)); // 8 moves
        board.place_player(PlayerId::Player2, Move::new(0, 0)); // 2 moves
        assert_eq!(MobilityRatio.evaluate(&board, PlayerId::Player1), 8.0 / 3.0);
        assert_eq!(MobilityRatio.evaluate(&board, PlayerId::Player2), 2.0 / 9.0);
        assert_eq!(OpenMoves.evaluate(&board, PlayerId::Player1), 8.0);
    }

    #[test]
    fn test_forced_loss_detected() {
        let board = forced_loss_board();
        assert_eq!(board.utility(PlayerId::Player1), 0.0);
        assert_eq!(
            board.legal_moves_for(PlayerId::Player2),
            vec![Move::new(4, 5)]
        );
        let eval = ForcedLoss::default();
        assert_eq!(eval.evaluate(&board, PlayerId::Player1), f64::INFINITY);
    }

    #[test]
    fn test_forced_loss_needs_opponent_on_move() {
        let mut board = forced_loss_board();
        board.active_player = PlayerId::Player1;
        let eval = ForcedLoss::default();
        let score = eval.evaluate(&board, PlayerId::Player1);
        assert!(score.is_finite());
    }

    #[test]
    fn test_aggression_phases() {
        let eval = Aggression::default();
        let mut board = Board::new(7, 7);
        board.place_player(PlayerId::Player1, Move::new(3, 3));
        board.place_player(PlayerId::Player2, Move::new(0, 0));
        // 47 blanks: opening
        assert_eq!(eval.evaluate(&board, PlayerId::Player1), 8.0);

        // 30 blanks: mid-game
        let mut filled = 0;
        for cell in board.blank_spaces() {
            if filled == 17 {
                break;
            }
            let near_p1 = (cell.row - 3).abs() <= 2 && (cell.col - 3).abs() <= 2;
            let near_p2 = cell.row <= 2 && cell.col <= 2;
            if !near_p1 && !near_p2 {
                board.block_cell(cell);
                filled += 1;
            }
        }
        assert_eq!(board.blank_spaces().len(), 30);
        assert_eq!(eval.evaluate(&board, PlayerId::Player1), 8.0 - 4.0 * 2.0);
    }

    #[test]
    fn test_weighted_mobility() {
        let mut board = Board::new(7, 7);
        board.place_player(PlayerId::Player1, Move::new(3, 3));
        board.place_player(PlayerId::Player2, Move::new(0, 0));
        let eval = WeightedMobility::default();
        assert_eq!(
            eval.evaluate(&board, PlayerId::Player1),
            8.0 * (1.0 + 8.0 / 3.0)
        );
    }
}
