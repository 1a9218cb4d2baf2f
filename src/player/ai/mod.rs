pub mod alpha_beta;
pub mod config;
pub mod engine;
pub mod eval;
pub mod evaluator;
pub mod minimax;
pub mod random;
pub mod search;
pub mod time;

pub use alpha_beta::AlphaBetaEngine;
pub use config::{AgentConfig, ConfigError, SearchMethod};
pub use engine::{SearchEngine, SearchOutcome, SearchResult};
pub use evaluator::{Evaluator, EvaluatorKind};
pub use minimax::MinimaxEngine;
pub use random::RandomAI;
pub use search::{Decision, SearchController};
pub use time::{countdown, Cancelled, TimeBudget};
