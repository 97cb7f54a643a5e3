use std::collections::BTreeMap;
use std::fmt::Display;
use std::rc::Rc;

use strum_macros::Display as StrumDisplay;

use crate::puzzle::Puzzle;

/// Operators are n-ary: `Expr(Add, ...)` sums all of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Op {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "*")]
    Mul,
}

/// An arithmetic expression tree over integer constants and single-letter
/// variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprTree {
    Const(i64),
    Var(char),
    Expr(Op, Vec<ExprTree>),
}

impl ExprTree {
    /// Evaluate under the given assignment. Unassigned variables (absent or
    /// zero) evaluate to 0.
    pub fn eval(&self, lookup: &BTreeMap<char, u8>) -> i64 {
        match self {
            ExprTree::Const(n) => *n,
            ExprTree::Var(c) => i64::from(lookup.get(c).copied().unwrap_or(0)),
            ExprTree::Expr(Op::Add, kids) => kids.iter().map(|k| k.eval(lookup)).sum(),
            ExprTree::Expr(Op::Mul, kids) => kids.iter().map(|k| k.eval(lookup)).product(),
        }
    }

    /// Record every variable appearing in the tree as unassigned (zero).
    pub fn populate_lookup(&self, lookup: &mut BTreeMap<char, u8>) {
        match self {
            ExprTree::Const(_) => {}
            ExprTree::Var(c) => {
                lookup.entry(*c).or_insert(0);
            }
            ExprTree::Expr(_, kids) => {
                for kid in kids {
                    kid.populate_lookup(lookup);
                }
            }
        }
    }
}

impl Display for ExprTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprTree::Const(n) => write!(f, "{}", n),
            ExprTree::Var(c) => write!(f, "{}", c),
            ExprTree::Expr(op, kids) => {
                write!(f, "(")?;
                for (i, kid) in kids.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op)?;
                    }
                    write!(f, "{}", kid)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Expression-assignment puzzle: assign each variable a digit 1-9 so the
/// tree evaluates to the target. A variable holding 0 is unassigned.
///
/// The tree is fixed rule data shared via `Rc`; the configuration is the
/// assignment map, which doubles as the dedup state.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprTreePuzzle {
    tree: Rc<ExprTree>,
    target: i64,
    assignments: BTreeMap<char, u8>,
}

impl ExprTreePuzzle {
    pub fn new(tree: Rc<ExprTree>, target: i64) -> Self {
        let mut assignments = BTreeMap::new();
        tree.populate_lookup(&mut assignments);
        ExprTreePuzzle { tree, target, assignments }
    }

    pub fn assignments(&self) -> &BTreeMap<char, u8> {
        &self.assignments
    }

    pub fn target(&self) -> i64 {
        self.target
    }
}

impl Display for ExprTreePuzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self.assignments)?;
        write!(f, "{} = {}", self.tree, self.target)
    }
}

impl Puzzle for ExprTreePuzzle {
    type State = BTreeMap<char, u8>;

    fn state(&self) -> &BTreeMap<char, u8> {
        &self.assignments
    }

    fn is_solved(&self) -> bool {
        self.assignments.values().all(|&v| v != 0)
            && self.tree.eval(&self.assignments) == self.target
    }

    /// One extension per (unassigned variable, digit 1-9) pair, variables in
    /// alphabetical order.
    fn extensions(&self) -> Vec<Self> {
        let mut exts = Vec::new();
        for (&var, &val) in &self.assignments {
            if val != 0 {
                continue;
            }
            for digit in 1..=9 {
                let mut ext = self.clone();
                ext.assignments.insert(var, digit);
                exts.push(ext);
            }
        }
        exts
    }

    /// Sound prunes: a non-positive target is unreachable (all assignments
    /// are positive digits and the operators are `+`/`*`), and a partial
    /// value already above the target can only grow.
    fn fail_fast(&self) -> bool {
        self.target <= 0 || self.tree.eval(&self.assignments) > self.target
    }
}
