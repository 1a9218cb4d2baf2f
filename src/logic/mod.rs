use crate::core::{Board, Move, PlayerId};

/// ナイトの移動方向 (この順序で合法手を列挙する)
pub const KNIGHT_DIRECTIONS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// 合法手生成
///
/// 未配置のプレイヤーは任意の空きセルに置ける。配置済みならナイト移動で空きセルへ。
pub fn legal_moves(board: &Board, player: PlayerId) -> Vec<Move> {
    let from = match board.location(player) {
        Some(from) => from,
        None => return board.blank_spaces(),
    };

    KNIGHT_DIRECTIONS
        .iter()
        .map(|&(dr, dc)| Move::new(from.row + dr, from.col + dc))
        .filter(|&to| board.is_blank(to))
        .collect()
}

/// 移動適用 (手番プレイヤーが動く)
pub fn apply_move(board: &Board, mv: Move) -> Board {
    let mut next = board.clone();
    next.apply_move_mut(mv);
    next
}

/// 手番の相手が動けなくなっていれば `player` の勝ち
pub fn is_winner(board: &Board, player: PlayerId) -> bool {
    player != board.active_player && legal_moves(board, board.active_player).is_empty()
}

/// 手番なのに動けなければ `player` の負け
pub fn is_loser(board: &Board, player: PlayerId) -> bool {
    player == board.active_player && legal_moves(board, player).is_empty()
}
