use crate::core::{Board, GameState, Move, PlayerId};
use crate::player::ai::countdown;
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 対局終了の理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// 手番側に合法手がない
    NoLegalMoves,
    /// 持ち時間切れで反則負け
    Timeout,
    /// 合法手以外を返して反則負け
    IllegalMove(Move),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub winner: PlayerId,
    pub termination: Termination,
    pub history: Vec<Move>,
}

pub struct Game {
    pub board: Board,
    pub history: Vec<Move>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Game {
            board,
            history: Vec::new(),
        }
    }

    /// Plays until one side cannot move or forfeits.
    ///
    /// Each controller gets a copy of the board and `time_limit` per move. Returning with
    /// the clock already expired, or returning a move outside the legal list, forfeits.
    pub fn play(
        &mut self,
        p1: &dyn PlayerController,
        p2: &dyn PlayerController,
        time_limit: Duration,
    ) -> GameRecord {
        loop {
            let current_player = self.board.active_player;
            let controller = match current_player {
                PlayerId::Player1 => p1,
                PlayerId::Player2 => p2,
            };

            let moves = self.board.legal_moves();
            if moves.is_empty() {
                log::info!(
                    "{} ({}) has no moves after {} plies",
                    controller.name(),
                    current_player,
                    self.history.len()
                );
                return self.finish(current_player.opponent(), Termination::NoLegalMoves);
            }

            let board_copy = self.board.clone();
            let time_left = countdown(time_limit);
            let mv = controller.choose_move(&board_copy, &moves, &time_left);

            if time_left() <= 0.0 {
                log::warn!("{} ({}) forfeits on time", controller.name(), current_player);
                return self.finish(current_player.opponent(), Termination::Timeout);
            }
            if !moves.contains(&mv) {
                log::warn!(
                    "{} ({}) forfeits with illegal move {}",
                    controller.name(),
                    current_player,
                    mv
                );
                return self.finish(current_player.opponent(), Termination::IllegalMove(mv));
            }

            log::debug!("{} ({}) plays {}", controller.name(), current_player, mv);
            self.board.apply_move_mut(mv);
            self.history.push(mv);
        }
    }

    fn finish(&self, winner: PlayerId, termination: Termination) -> GameRecord {
        GameRecord {
            winner,
            termination,
            history: self.history.clone(),
        }
    }
}
