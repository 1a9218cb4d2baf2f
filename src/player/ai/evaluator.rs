//! Evaluator trait for leaf scoring
//!
//! Defines a common interface for different evaluation strategies.

use super::eval::{
    Aggression, ForcedLoss, LateGameMobility, MobilityRatio, OpenMoves, WeightedMobility,
};
use crate::core::{GameState, PlayerId};
use serde::{Deserialize, Serialize};

/// Trait for evaluating positions
pub trait Evaluator<S: GameState>: Send + Sync {
    /// Evaluate `state` from `player`'s perspective
    ///
    /// Returns:
    ///   - `state.utility(player)` whenever the game is decided (±infinity)
    ///   - a heuristic estimate otherwise, larger is better for `player`
    fn evaluate(&self, state: &S, player: PlayerId) -> f64;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}

/// 設定ファイルから選べる評価関数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    OpenMoves,
    #[default]
    MobilityRatio,
    LateGameMobility,
    ForcedLoss,
    WeightedMobility,
    Aggression,
}

impl EvaluatorKind {
    /// Builds the strategy with its default tuning.
    pub fn build<S: GameState>(self) -> Box<dyn Evaluator<S>> {
        match self {
            EvaluatorKind::OpenMoves => Box::new(OpenMoves),
            EvaluatorKind::MobilityRatio => Box::new(MobilityRatio),
            EvaluatorKind::LateGameMobility => Box::new(LateGameMobility::default()),
            EvaluatorKind::ForcedLoss => Box::new(ForcedLoss::default()),
            EvaluatorKind::WeightedMobility => Box::new(WeightedMobility::default()),
            EvaluatorKind::Aggression => Box::new(Aggression::default()),
        }
    }
}
