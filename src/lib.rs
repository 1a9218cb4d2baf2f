//! Time-bounded adversarial search for two-player Isolation-style games.
//!
//! The search engines (`player::ai`) only see positions through
//! [`core::GameState`]; [`core::Board`] is the knight-move Isolation board used
//! by the match harness and self-play.

pub mod core;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;
