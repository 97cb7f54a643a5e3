use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

/// Error type for puzzle construction and parsing. This is used to indicate
/// something wrong with the puzzle definition itself (malformed grid text,
/// inconsistent dimensions, etc.). Exhaustion of the search space is not an
/// error; the solvers report that as a normal outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleError(Cow<'static, str>);
impl PuzzleError {
    pub const fn new_const(s: &'static str) -> Self {
        PuzzleError(Cow::Borrowed(s))
    }

    pub fn new<S: Into<String>>(s: S) -> Self {
        PuzzleError(Cow::Owned(s.into()))
    }
}

impl std::fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A full-information puzzle: a configuration plus the fixed rules that
/// determine which one-move configurations are reachable from it and whether
/// it counts as solved. Instances are immutable; an extension is a fresh
/// instance, and fixed rule data (dictionaries, targets, overlays) is set at
/// construction and shared rather than copied or mutated.
///
/// The solvers only ever see puzzles through this trait, so every concrete
/// puzzle must keep two promises:
///
/// - `extensions` is sound and complete with respect to its rules: every
///   returned puzzle is one legal move away, every legal move is returned,
///   and `self` is never among them. The order must be deterministic.
/// - two puzzles representing the same configuration expose `state()` values
///   that compare equal and hash identically. The visited set is keyed on
///   states, so inconsistent equality here silently breaks cycle avoidance.
///
/// Neither promise is checked at runtime.
pub trait Puzzle: Clone + Debug {
    /// The deduplication key: a value capturing the full configuration,
    /// excluding fixed rule data shared by every puzzle in the run.
    type State: Clone + Eq + Hash + Debug;

    fn state(&self) -> &Self::State;

    /// Whether this configuration satisfies the solved condition. Pure and
    /// deterministic.
    fn is_solved(&self) -> bool;

    /// All puzzles reachable by exactly one legal move, in a deterministic
    /// order. Empty if no moves exist.
    fn extensions(&self) -> Vec<Self>;

    /// A sound pruning hint: `true` only when no sequence of extensions can
    /// reach a solved state from here. `false` promises nothing. The default
    /// never prunes.
    fn fail_fast(&self) -> bool {
        false
    }
}
