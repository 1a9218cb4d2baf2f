use super::time::{Cancelled, TimeBudget};
use crate::core::{GameState, Move};

/// Score of a searched node together with the move that achieves it.
///
/// `best_move` is `Move::NONE` at depth-limit leaves and at nodes without legal moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub score: f64,
    pub best_move: Move,
}

impl SearchResult {
    pub fn leaf(score: f64) -> Self {
        Self {
            score,
            best_move: Move::NONE,
        }
    }
}

pub type SearchOutcome = Result<SearchResult, Cancelled>;

/// A depth-limited game-tree search.
pub trait SearchEngine<S: GameState> {
    /// Searches `depth` plies below `state`.
    ///
    /// The maximizing side at the root is the player whose score is reported
    /// (the "root player"): the side to move when `maximizing` is true, its
    /// opponent otherwise.
    fn search(
        &self,
        state: &S,
        depth: usize,
        maximizing: bool,
        budget: &TimeBudget<'_>,
    ) -> SearchOutcome;

    /// Nodes entered by the last call to `search`, including a cancelled one.
    fn nodes_searched(&self) -> u64;

    fn name(&self) -> &str;
}

pub(crate) fn root_player<S: GameState>(state: &S, maximizing: bool) -> crate::core::PlayerId {
    let active = state.active_player();
    if maximizing {
        active
    } else {
        state.opponent(active)
    }
}

/// Strict improvement test shared by both engines. Ties keep the earlier move.
pub(crate) fn improves(best: Option<&SearchResult>, score: f64, maximizing: bool) -> bool {
    match best {
        None => true,
        Some(best) if maximizing => score > best.score,
        Some(best) => score < best.score,
    }
}
