//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};
use crate::types::BOARD_SIZE;

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; BOARD_SIZE], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Positions that would immediately complete a line for the player,
    /// in ascending order without duplicates
    pub fn winning_moves(cells: &[Cell; BOARD_SIZE], player: Player) -> Vec<usize> {
        let mut moves: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| Self::winning_move_in_line(cells, player, line))
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }

    /// Find the winning move position in a specific line, if one exists
    fn winning_move_in_line(
        cells: &[Cell; BOARD_SIZE],
        player: Player,
        line: &[usize; 3],
    ) -> Option<usize> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty_pos = None;

        for &idx in line {
            match cells[idx] {
                Cell::Empty => {
                    if empty_pos.is_some() {
                        return None;
                    }
                    empty_pos = Some(idx);
                }
                c if c == target => count += 1,
                _ => return None,
            }
        }

        if count == 2 { empty_pos } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::BoardState;

    #[test]
    fn test_has_won() {
        let board = BoardState::from_string("XXXOO....").unwrap();
        assert!(LineAnalyzer::has_won(&board.cells, Player::X));
        assert!(!LineAnalyzer::has_won(&board.cells, Player::O));
    }

    #[test]
    fn test_winning_moves() {
        // X X .
        // O O .
        // . . .
        let board = BoardState::from_string("XX.OO....").unwrap();
        assert_eq!(LineAnalyzer::winning_moves(&board.cells, Player::X), vec![2]);
        assert_eq!(LineAnalyzer::winning_moves(&board.cells, Player::O), vec![5]);
    }

    #[test]
    fn test_winning_moves_deduplicated() {
        // X O X
        // O . O
        // X . X   -> 4 completes both diagonals
        let board = BoardState::from_string("XOXO.OX.X").unwrap();
        assert_eq!(
            LineAnalyzer::winning_moves(&board.cells, Player::X),
            vec![4, 7]
        );
    }
}
