use crate::core::{Board, GameState, PlayerId};
use crate::game::{Game, GameRecord, Termination};
use crate::player::ai::AgentConfig;
use crate::player::{PlayerController, SearchController};
use anyhow::Context;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    pub num_games: usize,
    pub board_width: usize,
    pub board_height: usize,
    pub time_limit_ms: u64,
    /// Random plies played before the agents take over
    pub opening_random_moves: usize,
    pub seed: Option<u64>,
    pub agent1: AgentConfig,
    pub agent2: AgentConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            board_width: 7,
            board_height: 7,
            time_limit_ms: 150,
            opening_random_moves: 2,
            seed: None,
            agent1: AgentConfig::default(),
            agent2: AgentConfig {
                method: crate::player::ai::SearchMethod::AlphaBeta,
                ..AgentConfig::default()
            },
        }
    }
}

impl SelfPlayConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: SelfPlayConfig = serde_json::from_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.agent1.validate().context("agent1")?;
        config.agent2.validate().context("agent2")?;
        Ok(config)
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GameResult {
    /// 1 or 2
    pub winner_agent: u8,
    pub agent1_started: bool,
    pub termination: Termination,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub started_at: String,
    pub total_games: usize,
    pub agent1_wins: usize,
    pub agent2_wins: usize,
    pub forfeits: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub agent1: AgentConfig,
    pub agent2: AgentConfig,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new(config: &SelfPlayConfig) -> Self {
        Self {
            started_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_games: 0,
            agent1_wins: 0,
            agent2_wins: 0,
            forfeits: 0,
            avg_moves: 0.0,
            avg_time_ms: 0.0,
            agent1: config.agent1.clone(),
            agent2: config.agent2.clone(),
            games: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner_agent {
            1 => self.agent1_wins += 1,
            _ => self.agent2_wins += 1,
        }
        if result.termination != Termination::NoLegalMoves {
            self.forfeits += 1;
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }
}

/// Applies `n` random plies, stopping early if the side to move is stuck.
pub fn after_random_moves<R: Rng>(board: &Board, n: usize, rng: &mut R) -> Board {
    let mut current = board.clone();
    for _ in 0..n {
        let moves = current.legal_moves();
        match moves.choose(rng) {
            Some(&mv) => current.apply_move_mut(mv),
            None => break,
        }
    }
    current
}

pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let mut stats = SelfPlayStats::new(config);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let agent1 = SearchController::<Board>::new("agent1", config.agent1.clone())?;
    let agent2 = SearchController::<Board>::new("agent2", config.agent2.clone())?;
    let time_limit = Duration::from_millis(config.time_limit_ms);

    for game_num in 1..=config.num_games {
        let start_time = Instant::now();

        // 先後を交互に入れ替える
        let agent1_started = game_num % 2 == 1;
        let first: &dyn PlayerController = &agent1;
        let second: &dyn PlayerController = &agent2;
        let (p1, p2) = if agent1_started {
            (first, second)
        } else {
            (second, first)
        };

        let board = Board::new(config.board_width, config.board_height);
        let board = after_random_moves(&board, config.opening_random_moves, &mut rng);
        let opening_plies = board.move_count;

        let mut game = Game::new(board);
        let record = game.play(p1, p2, time_limit);

        let elapsed = start_time.elapsed();
        let result = GameResult {
            winner_agent: winner_agent(&record, agent1_started),
            agent1_started,
            termination: record.termination,
            moves: opening_plies + record.history.len(),
            time_ms: elapsed.as_millis(),
        };
        log::info!(
            "game {}/{}: agent{} wins ({:?}, {} moves, {:.1}s)",
            game_num,
            config.num_games,
            result.winner_agent,
            result.termination,
            result.moves,
            elapsed.as_secs_f64()
        );
        stats.add_result(result);
    }

    Ok(stats)
}

fn winner_agent(record: &GameRecord, agent1_started: bool) -> u8 {
    match (record.winner, agent1_started) {
        (PlayerId::Player1, true) | (PlayerId::Player2, false) => 1,
        _ => 2,
    }
}
