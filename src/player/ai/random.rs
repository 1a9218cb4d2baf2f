use crate::core::{Board, Move};
use crate::player::PlayerController;
use rand::seq::SliceRandom;

/// Baseline opponent: a uniformly random legal move.
pub struct RandomAI {
    pub name: String,
}

impl RandomAI {
    pub fn new(name: &str) -> Self {
        RandomAI {
            name: name.to_string(),
        }
    }
}

impl PlayerController for RandomAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(
        &self,
        _board: &Board,
        legal_moves: &[Move],
        _time_left: &dyn Fn() -> f64,
    ) -> Move {
        let mut rng = rand::thread_rng();
        legal_moves.choose(&mut rng).copied().unwrap_or(Move::NONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    #[test]
    fn test_random_move_is_legal() {
        let board = Board::new(5, 5);
        let legal = board.legal_moves();
        let ai = RandomAI::new("random");
        let plenty = || 1_000.0;
        for _ in 0..20 {
            assert!(legal.contains(&ai.choose_move(&board, &legal, &plenty)));
        }
        assert_eq!(ai.choose_move(&board, &[], &plenty), Move::NONE);
    }
}
