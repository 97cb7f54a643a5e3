use std::collections::{HashSet, VecDeque};
use crate::puzzle::Puzzle;

/// Configuration shared by both search engines.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum number of node expansions before the search gives up with
    /// `Resolution::BudgetExceeded`. `None` means unbounded, in which case
    /// termination is only guaranteed for finite state spaces.
    pub node_budget: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { node_budget: None }
    }
}

/// How a search run ended. Exhaustion and budget overrun are ordinary
/// outcomes, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<P> {
    /// A solution path from the initial puzzle to a solved puzzle, inclusive
    /// of both endpoints. A single already-solved puzzle yields a path of
    /// length 1.
    Solved(Vec<P>),
    /// Every reachable, non-pruned state was expanded without finding a
    /// solved one.
    Exhausted,
    /// The node budget ran out before the state space did. Says nothing
    /// about solvability.
    BudgetExceeded,
}

/// Result of one search run: the resolution plus counters describing how the
/// run went. The counters are what make the pruning and deduplication
/// contracts testable from the outside.
#[derive(Debug, Clone)]
pub struct SolveReport<P: Puzzle> {
    pub resolution: Resolution<P>,
    /// Nodes whose extensions were generated.
    pub expansions: usize,
    /// Nodes discarded by `fail_fast` before expansion.
    pub pruned: usize,
    /// Frontier entries skipped because their state was already visited.
    pub deduped: usize,
    /// Largest number of entries the frontier held at any point.
    pub frontier_high_water: usize,
}

impl<P: Puzzle> SolveReport<P> {
    pub fn is_solved(&self) -> bool {
        matches!(self.resolution, Resolution::Solved(_))
    }

    pub fn path(&self) -> Option<&[P]> {
        match &self.resolution {
            Resolution::Solved(path) => Some(path),
            _ => None,
        }
    }
}

/// A search engine over any `Puzzle`. Both engines share the same contract;
/// they differ only in frontier discipline and therefore in the optimality
/// of the returned path.
pub trait Solver<P: Puzzle> {
    fn solve(&self, puzzle: &P) -> SolveReport<P>;
    fn name(&self) -> &'static str;
}

/// Depth-first engine: exhausts one extension's entire subtree before
/// trying the next sibling, siblings in `extensions()` order. Finds some
/// solution path if one exists in the reachable, non-pruned space; makes no
/// shortest-path promise. Uses an explicit stack, so deep puzzles cost heap,
/// not call stack.
#[derive(Debug, Clone, Default)]
pub struct DfsSolver {
    config: SolverConfig,
}

impl DfsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl<P: Puzzle> Solver<P> for DfsSolver {
    fn solve(&self, puzzle: &P) -> SolveReport<P> {
        run_search(puzzle, &self.config, &mut LifoFrontier(Vec::new()))
    }

    fn name(&self) -> &'static str {
        "dfs"
    }
}

/// Breadth-first engine: expands all states at distance k before any state
/// at distance k+1, so the returned path has the minimum number of moves
/// among paths that avoid pruned and visited states. Pays for the guarantee
/// by holding a whole depth level in the frontier.
#[derive(Debug, Clone, Default)]
pub struct BfsSolver {
    config: SolverConfig,
}

impl BfsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl<P: Puzzle> Solver<P> for BfsSolver {
    fn solve(&self, puzzle: &P) -> SolveReport<P> {
        run_search(puzzle, &self.config, &mut FifoFrontier(VecDeque::new()))
    }

    fn name(&self) -> &'static str {
        "bfs"
    }
}

/// An explored node: the puzzle plus the arena index of its parent. Parents
/// are plain indices into the arena rather than owned back-pointers; the
/// root is index 0 with no parent.
#[derive(Debug)]
struct SearchNode<P> {
    puzzle: P,
    parent: Option<usize>,
}

/// The frontier discipline is the only difference between the two engines,
/// so it is the one seam `run_search` is generic over. Entries are
/// `(puzzle, parent arena index)`; only extensions enter the frontier, the
/// root is expanded directly.
trait Frontier<P: Puzzle> {
    /// Admit one node's extensions, preserving the engine's sibling order.
    fn extend(&mut self, parent: usize, extensions: Vec<P>);
    fn pop(&mut self) -> Option<(P, usize)>;
    fn len(&self) -> usize;
}

struct LifoFrontier<P: Puzzle>(Vec<(P, usize)>);

impl<P: Puzzle> Frontier<P> for LifoFrontier<P> {
    fn extend(&mut self, parent: usize, extensions: Vec<P>) {
        // Reversed so the first sibling is popped (and its subtree fully
        // explored) first.
        for ext in extensions.into_iter().rev() {
            self.0.push((ext, parent));
        }
    }

    fn pop(&mut self) -> Option<(P, usize)> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

struct FifoFrontier<P: Puzzle>(VecDeque<(P, usize)>);

impl<P: Puzzle> Frontier<P> for FifoFrontier<P> {
    fn extend(&mut self, parent: usize, extensions: Vec<P>) {
        for ext in extensions {
            self.0.push_back((ext, parent));
        }
    }

    fn pop(&mut self) -> Option<(P, usize)> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Walk parent indices back from `idx` to the root and reverse.
fn path_to<P: Puzzle>(arena: &[SearchNode<P>], idx: usize) -> Vec<P> {
    let mut path = vec![arena[idx].puzzle.clone()];
    let mut at = idx;
    while let Some(parent) = arena[at].parent {
        path.push(arena[parent].puzzle.clone());
        at = parent;
    }
    path.reverse();
    path
}

/// The expansion loop shared by both engines.
///
/// The visited set is keyed on `Puzzle::State` and is local to this call.
/// States are marked visited when popped for expansion or when pruned, not
/// when enqueued, so a state may sit in the frontier more than once but is
/// expanded at most once. The solved check for the root happens exactly once
/// up front; every other node is checked when first popped.
fn run_search<P: Puzzle, F: Frontier<P>>(
    root: &P,
    config: &SolverConfig,
    frontier: &mut F,
) -> SolveReport<P> {
    let mut report = SolveReport {
        resolution: Resolution::Exhausted,
        expansions: 0,
        pruned: 0,
        deduped: 0,
        frontier_high_water: 0,
    };
    if root.is_solved() {
        report.resolution = Resolution::Solved(vec![root.clone()]);
        return report;
    }
    if root.fail_fast() {
        report.pruned = 1;
        return report;
    }

    let mut visited: HashSet<P::State> = HashSet::new();
    let mut arena: Vec<SearchNode<P>> = Vec::new();

    visited.insert(root.state().clone());
    arena.push(SearchNode { puzzle: root.clone(), parent: None });
    if config.node_budget == Some(0) {
        report.resolution = Resolution::BudgetExceeded;
        return report;
    }
    report.expansions = 1;
    frontier.extend(0, arena[0].puzzle.extensions());
    report.frontier_high_water = frontier.len();

    while let Some((puzzle, parent)) = frontier.pop() {
        if visited.contains(puzzle.state()) {
            report.deduped += 1;
            continue;
        }
        if puzzle.fail_fast() {
            visited.insert(puzzle.state().clone());
            report.pruned += 1;
            continue;
        }
        let idx = arena.len();
        let solved = puzzle.is_solved();
        arena.push(SearchNode { puzzle, parent: Some(parent) });
        if solved {
            report.resolution = Resolution::Solved(path_to(&arena, idx));
            return report;
        }
        visited.insert(arena[idx].puzzle.state().clone());
        if config.node_budget == Some(report.expansions) {
            report.resolution = Resolution::BudgetExceeded;
            return report;
        }
        report.expansions += 1;
        frontier.extend(idx, arena[idx].puzzle.extensions());
        report.frontier_high_water = report.frontier_high_water.max(frontier.len());
    }
    report
}

#[cfg(test)]
mod test {
    use super::*;
    use vec_box::vec_box;

    /// Toy puzzle: start at `n`, moves are `n + 1` and `n * 2` capped at
    /// `limit`, solved at `target`. Small, finite, and with genuinely
    /// different DFS and BFS paths.
    #[derive(Debug, Clone, PartialEq)]
    struct Countdown {
        n: u32,
        target: u32,
        limit: u32,
    }

    impl Countdown {
        fn new(n: u32, target: u32, limit: u32) -> Self {
            Countdown { n, target, limit }
        }

        fn with(&self, n: u32) -> Self {
            Countdown { n, ..*self }
        }
    }

    impl Puzzle for Countdown {
        type State = u32;

        fn state(&self) -> &u32 {
            &self.n
        }

        fn is_solved(&self) -> bool {
            self.n == self.target
        }

        fn extensions(&self) -> Vec<Self> {
            let mut exts = Vec::new();
            if self.n + 1 <= self.limit {
                exts.push(self.with(self.n + 1));
            }
            if self.n * 2 <= self.limit && self.n != 0 {
                exts.push(self.with(self.n * 2));
            }
            exts
        }
    }

    /// Toy puzzle that is never solved and always prunes.
    #[derive(Debug, Clone, PartialEq)]
    struct Doomed {
        n: u32,
    }

    impl Puzzle for Doomed {
        type State = u32;
        fn state(&self) -> &u32 {
            &self.n
        }
        fn is_solved(&self) -> bool {
            false
        }
        fn extensions(&self) -> Vec<Self> {
            vec![Doomed { n: self.n + 1 }]
        }
        fn fail_fast(&self) -> bool {
            true
        }
    }

    /// Toy puzzle walking an even cycle mod 10; odd targets are unreachable.
    #[derive(Debug, Clone, PartialEq)]
    struct EvenRing {
        n: u32,
        target: u32,
    }

    impl Puzzle for EvenRing {
        type State = u32;
        fn state(&self) -> &u32 {
            &self.n
        }
        fn is_solved(&self) -> bool {
            self.n == self.target
        }
        fn extensions(&self) -> Vec<Self> {
            vec![EvenRing { n: (self.n + 2) % 10, target: self.target }]
        }
    }

    fn both_engines<P: Puzzle + 'static>() -> Vec<Box<dyn Solver<P>>> {
        vec_box![DfsSolver::new(), BfsSolver::new()]
    }

    fn assert_sound_path(path: &[Countdown]) {
        assert!(path.last().unwrap().is_solved());
        for pair in path.windows(2) {
            assert!(
                pair[0].extensions().contains(&pair[1]),
                "{:?} -> {:?} is not a legal move",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_already_solved_returns_singleton() {
        let puzzle = Countdown::new(8, 8, 16);
        for solver in both_engines::<Countdown>() {
            let report = solver.solve(&puzzle);
            assert_eq!(report.path(), Some(&[puzzle.clone()][..]), "{}", solver.name());
            assert_eq!(report.expansions, 0, "{}", solver.name());
        }
    }

    #[test]
    fn test_both_engines_find_sound_paths() {
        let puzzle = Countdown::new(2, 11, 16);
        for solver in both_engines::<Countdown>() {
            let report = solver.solve(&puzzle);
            let path = report.path().unwrap_or_else(|| panic!("{} failed", solver.name()));
            assert_eq!(path[0], puzzle);
            assert_sound_path(path);
        }
    }

    #[test]
    fn test_bfs_path_is_no_longer_than_dfs() {
        let puzzle = Countdown::new(2, 8, 16);
        let dfs = DfsSolver::new().solve(&puzzle);
        let bfs = BfsSolver::new().solve(&puzzle);
        // 2 -> 4 -> 8 is optimal; DFS tries +1 first and wanders.
        assert_eq!(bfs.path().unwrap().len(), 3);
        assert!(bfs.path().unwrap().len() <= dfs.path().unwrap().len());
        assert_sound_path(dfs.path().unwrap());
    }

    #[test]
    fn test_dfs_tries_siblings_in_extension_order() {
        // With +1 listed before *2, the DFS path out of 2 must start 2, 3.
        let report = DfsSolver::new().solve(&Countdown::new(2, 8, 16));
        let path = report.path().unwrap();
        assert_eq!(path[1].n, 3);
    }

    #[test]
    fn test_unreachable_target_exhausts() {
        let puzzle = EvenRing { n: 0, target: 5 };
        for solver in both_engines::<EvenRing>() {
            let report = solver.solve(&puzzle);
            assert_eq!(report.resolution, Resolution::Exhausted, "{}", solver.name());
            // Exactly the five even residues get expanded, each once.
            assert_eq!(report.expansions, 5, "{}", solver.name());
        }
    }

    #[test]
    fn test_dead_end_root_exhausts() {
        let puzzle = Countdown::new(16, 8, 16);
        for solver in both_engines::<Countdown>() {
            let report = solver.solve(&puzzle);
            assert_eq!(report.resolution, Resolution::Exhausted, "{}", solver.name());
            assert_eq!(report.expansions, 1, "{}", solver.name());
        }
    }

    #[test]
    fn test_fail_fast_root_fails_without_expansion() {
        let puzzle = Doomed { n: 0 };
        for solver in both_engines::<Doomed>() {
            let report = solver.solve(&puzzle);
            assert_eq!(report.resolution, Resolution::Exhausted, "{}", solver.name());
            assert_eq!(report.expansions, 0, "{}", solver.name());
            assert_eq!(report.pruned, 1, "{}", solver.name());
        }
    }

    #[test]
    fn test_node_budget_is_a_distinct_outcome() {
        let puzzle = Countdown::new(2, 11, 16);
        let config = SolverConfig { node_budget: Some(2) };
        let solvers: Vec<Box<dyn Solver<Countdown>>> = vec_box![
            DfsSolver::with_config(config.clone()),
            BfsSolver::with_config(config),
        ];
        for solver in solvers {
            let report = solver.solve(&puzzle);
            assert_eq!(report.resolution, Resolution::BudgetExceeded, "{}", solver.name());
            assert!(report.expansions <= 2, "{}", solver.name());
        }
    }

    #[test]
    fn test_zero_budget_expands_nothing() {
        let solver = BfsSolver::with_config(SolverConfig { node_budget: Some(0) });
        let report = solver.solve(&Countdown::new(2, 11, 16));
        assert_eq!(report.resolution, Resolution::BudgetExceeded);
        assert_eq!(report.expansions, 0);
    }

    #[test]
    fn test_repeated_solves_are_independent() {
        let puzzle = Countdown::new(2, 8, 16);
        let solver = BfsSolver::new();
        let first = solver.solve(&puzzle);
        let second = solver.solve(&puzzle);
        assert_eq!(first.path(), second.path());
        assert_eq!(first.expansions, second.expansions);
    }

    #[test]
    fn test_frontier_high_water_reported() {
        let report = BfsSolver::new().solve(&Countdown::new(2, 11, 16));
        assert!(report.frontier_high_water >= 2);
    }
}
