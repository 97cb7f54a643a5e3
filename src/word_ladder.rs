use std::collections::HashSet;
use std::fmt::Display;
use std::rc::Rc;

use crate::puzzle::{Puzzle, PuzzleError};

/// Word-transformation puzzle: turn a start word into a target word one
/// letter at a time, with every intermediate word drawn from a dictionary.
///
/// The dictionary and target are fixed rules, shared across the whole run
/// via `Rc`; the configuration is just the current word.
#[derive(Debug, Clone)]
pub struct WordLadderPuzzle {
    word: String,
    target: String,
    words: Rc<HashSet<String>>,
}

impl WordLadderPuzzle {
    /// Build a ladder puzzle. The start and target words must themselves be
    /// in the dictionary; anything else is a malformed puzzle, not an
    /// unsolvable one.
    pub fn new(
        word: &str,
        target: &str,
        words: Rc<HashSet<String>>,
    ) -> Result<Self, PuzzleError> {
        if !words.contains(word) {
            return Err(PuzzleError::new(format!("start word {:?} not in dictionary", word)));
        }
        if !words.contains(target) {
            return Err(PuzzleError::new(format!("target word {:?} not in dictionary", target)));
        }
        Ok(WordLadderPuzzle {
            word: word.to_string(),
            target: target.to_string(),
            words,
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Display for WordLadderPuzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.word, self.target)
    }
}

impl PartialEq for WordLadderPuzzle {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word && self.target == other.target
    }
}

impl Puzzle for WordLadderPuzzle {
    type State = String;

    fn state(&self) -> &String {
        &self.word
    }

    fn is_solved(&self) -> bool {
        self.word == self.target
    }

    /// Every dictionary word differing from the current word in exactly one
    /// position, position-major then alphabetical.
    fn extensions(&self) -> Vec<Self> {
        let mut exts = Vec::new();
        let bytes = self.word.as_bytes();
        for i in 0..bytes.len() {
            for c in b'a'..=b'z' {
                if c == bytes[i] {
                    continue;
                }
                let mut candidate = bytes.to_vec();
                candidate[i] = c;
                // Dictionary words are ASCII lowercase, so the byte swap
                // stays valid UTF-8.
                let candidate = String::from_utf8(candidate).unwrap_or_default();
                if self.words.contains(&candidate) {
                    exts.push(WordLadderPuzzle {
                        word: candidate,
                        target: self.target.clone(),
                        words: Rc::clone(&self.words),
                    });
                }
            }
        }
        exts
    }

    /// Moves never change word length, so a length mismatch with the target
    /// is provably unsolvable.
    fn fail_fast(&self) -> bool {
        self.word.len() != self.target.len()
    }
}
