//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game_tree;
pub mod lines;

pub use board::{BoardState, Cell, Player};
pub use game_tree::{enumerate_agent_states, ply};
pub use lines::{LineAnalyzer, WINNING_LINES};
