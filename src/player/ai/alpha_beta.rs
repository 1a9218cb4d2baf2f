use super::engine::{improves, root_player, SearchEngine, SearchOutcome, SearchResult};
use super::evaluator::Evaluator;
use super::time::TimeBudget;
use crate::core::{GameState, PlayerId};
use std::cell::Cell;

/// Minimax with alpha-beta pruning.
///
/// Returns the same root score and move as [`super::minimax::MinimaxEngine`]
/// while visiting fewer nodes.
pub struct AlphaBetaEngine<S: GameState> {
    evaluator: Box<dyn Evaluator<S>>,
    nodes_evaluated: Cell<u64>,
}

impl<S: GameState> AlphaBetaEngine<S> {
    pub fn new(evaluator: Box<dyn Evaluator<S>>) -> Self {
        Self {
            evaluator,
            nodes_evaluated: Cell::new(0),
        }
    }

    /// Search with an explicit window. `search` uses `(-inf, +inf)`.
    pub fn search_window(
        &self,
        state: &S,
        depth: usize,
        alpha: f64,
        beta: f64,
        maximizing: bool,
        budget: &TimeBudget<'_>,
    ) -> SearchOutcome {
        self.nodes_evaluated.set(0);
        let root = root_player(state, maximizing);
        self.alpha_beta(state, depth, alpha, beta, maximizing, root, budget)
    }

    // --- Alpha-Beta Search ---
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &self,
        state: &S,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        is_maximizing: bool,
        root: PlayerId,
        budget: &TimeBudget<'_>,
    ) -> SearchOutcome {
        self.nodes_evaluated.set(self.nodes_evaluated.get() + 1);
        budget.check()?;

        if depth == 0 {
            return Ok(SearchResult::leaf(self.evaluator.evaluate(state, root)));
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            return Ok(SearchResult::leaf(self.evaluator.evaluate(state, root)));
        }

        let mut best: Option<SearchResult> = None;
        for mv in moves {
            let next_state = state.forecast_move(mv);
            let child = self.alpha_beta(
                &next_state,
                depth - 1,
                alpha,
                beta,
                !is_maximizing,
                root,
                budget,
            )?;
            if improves(best.as_ref(), child.score, is_maximizing) {
                best = Some(SearchResult {
                    score: child.score,
                    best_move: mv,
                });
            }

            // best は直前に必ず設定されている
            let best_score = best.map_or(child.score, |b| b.score);
            if is_maximizing {
                alpha = alpha.max(best_score);
            } else {
                beta = beta.min(best_score);
            }
            if alpha >= beta {
                break; // Cutoff
            }
        }

        Ok(best.unwrap_or_else(|| SearchResult::leaf(self.evaluator.evaluate(state, root))))
    }
}

impl<S: GameState> SearchEngine<S> for AlphaBetaEngine<S> {
    fn search(
        &self,
        state: &S,
        depth: usize,
        maximizing: bool,
        budget: &TimeBudget<'_>,
    ) -> SearchOutcome {
        self.search_window(
            state,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            maximizing,
            budget,
        )
    }

    fn nodes_searched(&self) -> u64 {
        self.nodes_evaluated.get()
    }

    fn name(&self) -> &str {
        "alphabeta"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Move};
    use crate::player::ai::eval::{MobilityRatio, OpenMoves};
    use crate::player::ai::time::Cancelled;
    use std::cell::Cell;

    fn plenty() -> f64 {
        1_000.0
    }

    fn midgame_board() -> Board {
        let mut board = Board::new(5, 5);
        for mv in [(2, 2), (0, 0), (0, 1), (2, 1), (1, 3)] {
            board.apply_move_mut(Move::from(mv));
        }
        board
    }

    #[test]
    fn test_depth_zero_is_leaf_evaluation() {
        let board = midgame_board();
        let engine = AlphaBetaEngine::<Board>::new(Box::new(MobilityRatio));
        let budget = TimeBudget::new(&plenty, 10.0);
        let result = engine.search(&board, 0, true, &budget).unwrap();
        assert_eq!(result.best_move, Move::NONE);
        assert_eq!(
            result.score,
            MobilityRatio.evaluate(&board, board.active_player)
        );
    }

    #[test]
    fn test_minimizing_root_scores_for_opponent() {
        let board = midgame_board();
        let engine = AlphaBetaEngine::<Board>::new(Box::new(OpenMoves));
        let budget = TimeBudget::new(&plenty, 10.0);
        let result = engine.search(&board, 0, false, &budget).unwrap();
        let opponent = board.active_player.opponent();
        assert_eq!(result.score, OpenMoves.evaluate(&board, opponent));
    }

    #[test]
    fn test_cancellation_mid_search_unwinds() {
        let board = midgame_board();
        let engine = AlphaBetaEngine::<Board>::new(Box::new(OpenMoves));
        let calls = Cell::new(0u32);
        // 5 ノード目で時間切れ
        let clock = || {
            calls.set(calls.get() + 1);
            if calls.get() < 5 {
                100.0
            } else {
                0.0
            }
        };
        let budget = TimeBudget::new(&clock, 10.0);
        assert_eq!(engine.search(&board, 4, true, &budget), Err(Cancelled));
        assert_eq!(engine.nodes_searched(), 5);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_narrow_window_still_returns_legal_move() {
        let board = midgame_board();
        let engine = AlphaBetaEngine::<Board>::new(Box::new(OpenMoves));
        let budget = TimeBudget::new(&plenty, 10.0);
        let result = engine
            .search_window(&board, 2, 0.0, 1.0, true, &budget)
            .unwrap();
        assert!(board.legal_moves().contains(&result.best_move));
    }
}
