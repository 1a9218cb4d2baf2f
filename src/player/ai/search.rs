//! Top-level move decision: opening fallback, engine selection and
//! iterative deepening under the harness deadline.

use super::alpha_beta::AlphaBetaEngine;
use super::config::{AgentConfig, ConfigError, SearchMethod};
use super::engine::SearchEngine;
use super::evaluator::Evaluator;
use super::minimax::MinimaxEngine;
use super::time::TimeBudget;
use crate::core::{Board, GameState, Move};
use crate::player::PlayerController;

/// Outcome of one decision, for logging and statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub best_move: Move,
    /// Deepest fully completed search, `None` when the fallback was returned
    pub completed_depth: Option<usize>,
    /// Nodes entered across all depths, cancelled work included
    pub nodes: u64,
}

impl Decision {
    fn fallback(best_move: Move) -> Self {
        Self {
            best_move,
            completed_depth: None,
            nodes: 0,
        }
    }
}

pub struct SearchController<S: GameState> {
    name: String,
    config: AgentConfig,
    engine: Box<dyn SearchEngine<S>>,
}

impl<S: GameState + 'static> SearchController<S> {
    pub fn new(name: &str, config: AgentConfig) -> Result<Self, ConfigError> {
        let evaluator = config.evaluator.build::<S>();
        Self::with_evaluator(name, config, evaluator)
    }

    /// Uses a caller-supplied evaluator instead of `config.evaluator`.
    pub fn with_evaluator(
        name: &str,
        config: AgentConfig,
        evaluator: Box<dyn Evaluator<S>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine: Box<dyn SearchEngine<S>> = match config.method {
            SearchMethod::Minimax => Box::new(MinimaxEngine::new(evaluator)),
            SearchMethod::AlphaBeta => Box::new(AlphaBetaEngine::new(evaluator)),
        };
        Ok(Self {
            name: name.to_string(),
            config,
            engine,
        })
    }
}

impl<S: GameState> SearchController<S> {
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Chooses a move before the deadline reported by `time_left`.
    ///
    /// Returns `Move::NONE` only when `legal_moves` is empty.
    pub fn request_move(
        &self,
        state: &S,
        legal_moves: &[Move],
        time_left: &dyn Fn() -> f64,
    ) -> Move {
        self.decide(state, legal_moves, time_left).best_move
    }

    pub fn decide(
        &self,
        state: &S,
        legal_moves: &[Move],
        time_left: &dyn Fn() -> f64,
    ) -> Decision {
        if legal_moves.is_empty() {
            return Decision::fallback(Move::NONE);
        }

        let fallback = opening_move(state, legal_moves);
        let budget = TimeBudget::new(time_left, self.config.timeout_threshold_ms);
        // 閾値ちょうどでは探索を始めない (ループ継続条件と同じ)
        if !budget.has_time() {
            log::debug!(
                "[{}] no time to search (threshold {} ms), playing {}",
                self.name,
                budget.threshold_ms(),
                fallback
            );
            return Decision::fallback(fallback);
        }

        if self.config.iterative {
            self.iterative_deepening(state, fallback, &budget)
        } else {
            self.fixed_depth(state, fallback, &budget)
        }
    }

    fn fixed_depth(&self, state: &S, fallback: Move, budget: &TimeBudget<'_>) -> Decision {
        let depth = self.config.search_depth as usize;
        match self.engine.search(state, depth, true, budget) {
            Ok(result) if !result.best_move.is_none() => Decision {
                best_move: result.best_move,
                completed_depth: Some(depth),
                nodes: self.engine.nodes_searched(),
            },
            Ok(_) => Decision {
                best_move: fallback,
                completed_depth: Some(depth),
                nodes: self.engine.nodes_searched(),
            },
            Err(_) => {
                log::debug!("[{}] depth {} cancelled", self.name, depth);
                Decision {
                    best_move: fallback,
                    completed_depth: None,
                    nodes: self.engine.nodes_searched(),
                }
            }
        }
    }

    fn iterative_deepening(&self, state: &S, fallback: Move, budget: &TimeBudget<'_>) -> Decision {
        // 残り手数より深く読んでも結果は変わらない
        let max_depth = state.remaining_plies();
        let mut decision = Decision::fallback(fallback);
        let mut depth = 0;

        loop {
            match self.engine.search(state, depth, true, budget) {
                Ok(result) => {
                    decision.nodes += self.engine.nodes_searched();
                    decision.completed_depth = Some(depth);
                    // depth 0 は手を持たない
                    if !result.best_move.is_none() {
                        decision.best_move = result.best_move;
                    }
                    log::trace!(
                        "[{}] depth {} done: {} (score {})",
                        self.name,
                        depth,
                        result.best_move,
                        result.score
                    );
                }
                Err(_) => {
                    decision.nodes += self.engine.nodes_searched();
                    break;
                }
            }

            depth += 1;
            if depth > max_depth || !budget.has_time() {
                break;
            }
        }

        log::debug!(
            "[{}] {} picked {} at depth {:?} ({} nodes)",
            self.name,
            self.engine.name(),
            decision.best_move,
            decision.completed_depth,
            decision.nodes
        );
        decision
    }
}

/// Center cell on the first ply when it is free, else the first legal move.
fn opening_move<S: GameState>(state: &S, legal_moves: &[Move]) -> Move {
    let center = state.center();
    if state.move_count() <= 1 && legal_moves.contains(&center) {
        center
    } else {
        legal_moves[0]
    }
}

impl PlayerController for SearchController<Board> {
    fn choose_move(
        &self,
        board: &Board,
        legal_moves: &[Move],
        time_left: &dyn Fn() -> f64,
    ) -> Move {
        self.request_move(board, legal_moves, time_left)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
