//! Fixed opponents the agent is trained and evaluated against

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    ports::Opponent,
    tictactoe::{BoardState, LineAnalyzer},
};

fn uniform(moves: Vec<usize>) -> Vec<(usize, f64)> {
    let weight = 1.0 / moves.len() as f64;
    moves.into_iter().map(|mv| (mv, weight)).collect()
}

/// Opponent that plays uniformly at random
#[derive(Debug, Clone)]
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new() -> Self {
        Self::with_seed(random())
    }

    /// Create a random opponent with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoValidMoves);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn move_distribution(&self, state: &BoardState) -> Vec<(usize, f64)> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Vec::new();
        }
        uniform(moves)
    }

    fn name(&self) -> &str {
        "random"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Opponent that completes its own line when it can, otherwise blocks the
/// agent's line, otherwise plays uniformly at random.
///
/// When several cells win (or block) the lowest position is taken, so the
/// forced part of its play is deterministic.
#[derive(Debug, Clone)]
pub struct DefensiveOpponent {
    rng: StdRng,
}

impl DefensiveOpponent {
    pub fn new() -> Self {
        Self::with_seed(random())
    }

    /// Create a defensive opponent with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Winning cell for the player to move, else a cell that blocks the
    /// other player's win.
    fn forced_move(state: &BoardState) -> Option<usize> {
        let me = state.to_move;
        LineAnalyzer::winning_moves(&state.cells, me)
            .first()
            .copied()
            .or_else(|| {
                LineAnalyzer::winning_moves(&state.cells, me.opponent())
                    .first()
                    .copied()
            })
    }
}

impl Default for DefensiveOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for DefensiveOpponent {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoValidMoves);
        }
        if let Some(forced) = Self::forced_move(state) {
            return Ok(forced);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn move_distribution(&self, state: &BoardState) -> Vec<(usize, f64)> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Vec::new();
        }
        match Self::forced_move(state) {
            Some(forced) => vec![(forced, 1.0)],
            None => uniform(moves),
        }
    }

    fn name(&self) -> &str {
        "defensive"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
