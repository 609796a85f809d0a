//! Enumeration of the positions an agent can face

use std::collections::{HashSet, VecDeque};

use super::{Player, board::BoardState};

/// Enumerate every position reachable from the empty board when `agent`
/// moves first, keeping those where `agent` is to move or the game is over.
///
/// The result is duplicate-free and ordered breadth-first (by ply, then by
/// move position), so repeated calls return the same sequence.
pub fn enumerate_agent_states(agent: Player) -> Vec<BoardState> {
    let root = BoardState::new_with_player(agent);
    let mut visited = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);
    let mut states = Vec::new();

    while let Some(state) = queue.pop_front() {
        let terminal = state.is_terminal();
        if terminal || state.to_move == agent {
            states.push(state);
        }
        if terminal {
            continue;
        }

        for pos in state.legal_moves() {
            let Ok(next) = state.make_move(pos) else {
                continue;
            };
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    states
}

/// Number of occupied cells, i.e. the ply a position was reached at
pub fn ply(state: &BoardState) -> usize {
    state.cells.iter().filter(|&&c| c != super::Cell::Empty).count()
}
