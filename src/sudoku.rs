use std::fmt::Display;

use bit_set::BitSet;

use crate::puzzle::{Puzzle, PuzzleError};

/// N x N sudoku grid with boxes B rows tall and N/B columns wide, digits
/// 1..=N. The standard 9x9 is `SudokuPuzzle<9, 3>`; 4x4 and 6x6 variants are
/// `<4, 2>` and `<6, 2>`.
///
/// As a search puzzle the configuration is the whole grid; a move fills the
/// first empty cell (row-major) with a digit that conflicts with no row,
/// column, or box peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SudokuPuzzle<const N: usize = 9, const B: usize = 3> {
    grid: [[Option<u8>; N]; N],
}

pub type NineStandard = SudokuPuzzle<9, 3>;
pub type SixStandard = SudokuPuzzle<6, 2>;
pub type FourStandard = SudokuPuzzle<4, 2>;

pub fn nine_standard_parse(s: &str) -> Result<NineStandard, PuzzleError> {
    SudokuPuzzle::parse(s)
}

pub fn six_standard_parse(s: &str) -> Result<SixStandard, PuzzleError> {
    SudokuPuzzle::parse(s)
}

pub fn four_standard_parse(s: &str) -> Result<FourStandard, PuzzleError> {
    SudokuPuzzle::parse(s)
}

impl<const N: usize, const B: usize> SudokuPuzzle<N, B> {
    pub fn new() -> Self {
        Self { grid: [[None; N]; N] }
    }

    pub fn parse(s: &str) -> Result<Self, PuzzleError> {
        let lines: Vec<&str> = s.lines().collect();
        if lines.len() != N {
            return Err(PuzzleError::new("Invalid number of rows".to_string()));
        }
        let mut grid = [[None; N]; N];
        for i in 0..N {
            let line = lines[i].trim();
            if line.len() != N {
                return Err(PuzzleError::new("Invalid number of columns".to_string()));
            }
            for (j, c) in line.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                match c.to_digit(10) {
                    Some(d) if (1..=N as u32).contains(&d) => {
                        grid[i][j] = Some(d as u8);
                    }
                    _ => {
                        return Err(PuzzleError::new("Invalid character in input".to_string()));
                    }
                }
            }
        }
        Ok(Self { grid })
    }

    pub fn serialize(&self) -> String {
        let mut result = String::new();
        for row in &self.grid {
            for &cell in row {
                if let Some(value) = cell {
                    result.push_str(&value.to_string());
                } else {
                    result.push('.');
                }
            }
            result.push('\n');
        }
        result
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.grid[row][col]
    }

    fn first_empty(&self) -> Option<(usize, usize)> {
        for r in 0..N {
            for c in 0..N {
                if self.grid[r][c].is_none() {
                    return Some((r, c));
                }
            }
        }
        None
    }

    /// Digits still legal at (row, col), as a bitmask over 1..=N.
    fn candidates(&self, row: usize, col: usize) -> BitSet {
        let mut seen = BitSet::with_capacity(N + 1);
        for i in 0..N {
            if let Some(v) = self.grid[row][i] {
                seen.insert(v as usize);
            }
            if let Some(v) = self.grid[i][col] {
                seen.insert(v as usize);
            }
        }
        let box_cols = N / B;
        let r0 = (row / B) * B;
        let c0 = (col / box_cols) * box_cols;
        for r in r0..r0 + B {
            for c in c0..c0 + box_cols {
                if let Some(v) = self.grid[r][c] {
                    seen.insert(v as usize);
                }
            }
        }
        let mut open = BitSet::with_capacity(N + 1);
        for d in 1..=N {
            if !seen.contains(d) {
                open.insert(d);
            }
        }
        open
    }

    fn no_duplicates(&self) -> bool {
        let box_cols = N / B;
        for group in 0..N {
            let mut row_seen = [false; 16];
            let mut col_seen = [false; 16];
            let mut box_seen = [false; 16];
            for i in 0..N {
                if let Some(v) = self.grid[group][i] {
                    if row_seen[v as usize] {
                        return false;
                    }
                    row_seen[v as usize] = true;
                }
                if let Some(v) = self.grid[i][group] {
                    if col_seen[v as usize] {
                        return false;
                    }
                    col_seen[v as usize] = true;
                }
                // B boxes per band of rows, each box_cols wide.
                let r = (group / B) * B + i / box_cols;
                let c = (group % B) * box_cols + i % box_cols;
                if let Some(v) = self.grid[r][c] {
                    if box_seen[v as usize] {
                        return false;
                    }
                    box_seen[v as usize] = true;
                }
            }
        }
        true
    }
}

impl<const N: usize, const B: usize> Default for SudokuPuzzle<N, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const B: usize> Display for SudokuPuzzle<N, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl<const N: usize, const B: usize> Puzzle for SudokuPuzzle<N, B> {
    type State = [[Option<u8>; N]; N];

    fn state(&self) -> &Self::State {
        &self.grid
    }

    fn is_solved(&self) -> bool {
        self.first_empty().is_none() && self.no_duplicates()
    }

    /// One extension per legal digit in the first empty cell, ascending.
    /// Restricting moves to a single cell keeps the search space a tree:
    /// filling cells in a different order would only reproduce the same
    /// grids.
    fn extensions(&self) -> Vec<Self> {
        let Some((row, col)) = self.first_empty() else {
            return vec![];
        };
        let mut exts = Vec::new();
        for d in self.candidates(row, col).iter() {
            let mut ext = *self;
            ext.grid[row][col] = Some(d as u8);
            exts.push(ext);
        }
        exts
    }

    /// An empty cell with no legal digit left can never be filled.
    fn fail_fast(&self) -> bool {
        for r in 0..N {
            for c in 0..N {
                if self.grid[r][c].is_none() && self.candidates(r, c).is_empty() {
                    return true;
                }
            }
        }
        false
    }
}
