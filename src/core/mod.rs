pub mod board;
pub mod r#move;
pub mod state;
pub mod types;

pub use board::Board;
pub use r#move::Move;
pub use state::GameState;
pub use types::PlayerId;
