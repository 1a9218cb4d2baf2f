use crate::core::{Board, Move};

/// プレイヤー操作のtrait
pub trait PlayerController {
    /// `time_left` はこの手番の残り時間 (ミリ秒) を返す。
    /// 合法手がなければ `Move::NONE` を返す。
    fn choose_move(&self, board: &Board, legal_moves: &[Move], time_left: &dyn Fn() -> f64)
        -> Move;
    fn name(&self) -> &str;
}
