use super::engine::{improves, root_player, SearchEngine, SearchOutcome, SearchResult};
use super::evaluator::Evaluator;
use super::time::TimeBudget;
use crate::core::{GameState, PlayerId};
use std::cell::Cell;

/// Plain depth-limited minimax without pruning.
pub struct MinimaxEngine<S: GameState> {
    evaluator: Box<dyn Evaluator<S>>,
    nodes_evaluated: Cell<u64>,
}

impl<S: GameState> MinimaxEngine<S> {
    pub fn new(evaluator: Box<dyn Evaluator<S>>) -> Self {
        Self {
            evaluator,
            nodes_evaluated: Cell::new(0),
        }
    }

    fn minimax(
        &self,
        state: &S,
        depth: usize,
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
            // 動けない: 評価関数が終局値 (±inf) を返す
            return Ok(SearchResult::leaf(self.evaluator.evaluate(state, root)));
        }

        let mut best: Option<SearchResult> = None;
        for mv in moves {
            let next_state = state.forecast_move(mv);
            let child = self.minimax(&next_state, depth - 1, !is_maximizing, root, budget)?;
            if improves(best.as_ref(), child.score, is_maximizing) {
                best = Some(SearchResult {
                    score: child.score,
                    best_move: mv,
                });
            }
        }

        // moves が空でないので必ず Some
        Ok(best.unwrap_or_else(|| SearchResult::leaf(self.evaluator.evaluate(state, root))))
    }
}

impl<S: GameState> SearchEngine<S> for MinimaxEngine<S> {
    fn search(
        &self,
        state: &S,
        depth: usize,
        maximizing: bool,
        budget: &TimeBudget<'_>,
    ) -> SearchOutcome {
        self.nodes_evaluated.set(0);
        let root = root_player(state, maximizing);
        self.minimax(state, depth, maximizing, root, budget)
    }

    fn nodes_searched(&self) -> u64 {
        self.nodes_evaluated.get()
    }

    fn name(&self) -> &str {
        "minimax"
    }
}
