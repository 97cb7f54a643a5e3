pub mod puzzle;
pub mod solver;
pub mod sudoku;
pub mod word_ladder;
pub mod expr_tree;
