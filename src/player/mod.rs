pub mod ai;
pub mod controller;

pub use ai::{RandomAI, SearchController};
pub use controller::PlayerController;
