#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Defines the DPLL (Davis-Putnam-Logemann-Loveland) SAT solver.
//!
//! Each node of the search receives a clause set and a partial assignment and
//! runs through these steps:
//! 1.  **Unit propagation** to a fixed point. A conflict fails the node.
//! 2.  **Pure-literal elimination**, once per node unless configured otherwise.
//! 3.  If no clause is left, the assignment satisfies the formula.
//! 4.  **Decision:** an unassigned variable is picked by the configured
//!     [`VariableSelection`] policy and the node branches on it, `true` first.
//!     The first successful branch wins. If both fail, so does the node.
//!
//! Nodes are kept on an explicit stack of frames rather than the call stack,
//! so formulas with many variables cannot overflow it. Each frame owns its
//! clause set and assignment; branching clones them.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::error::{Conflict, Result};
use crate::sat::literal::{Literal, Variable};
use crate::sat::simplify::{assign_literal, PureLiteralElimination, Simplifier, UnitPropagation};
use crate::sat::solver::{SolutionStats, Solutions, Solver, SolverOptions, Verdict};
use crate::sat::variable_selection::{VariableSelection, VariableSelectionImpls};

/// Result of [`solve_by_search`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchOutcome {
    pub verdict: Verdict,
    /// A total assignment over the formula's variables when satisfiable,
    /// empty otherwise.
    pub assignment: Solutions,
    pub decisions: usize,
    pub conflicts: usize,
}

impl SearchOutcome {
    #[must_use]
    pub const fn satisfiable(&self) -> bool {
        self.verdict.is_sat()
    }
}

/// Decides `cnf` by backtracking search with default options.
#[must_use]
pub fn solve_by_search(cnf: &Cnf) -> SearchOutcome {
    solve_by_search_with(cnf, &SolverOptions::default())
}

/// Decides `cnf` by backtracking search.
///
/// Assumes a well-formed formula: every literal is non-zero, which [`Cnf`]
/// guarantees by construction.
#[must_use]
pub fn solve_by_search_with(cnf: &Cnf, options: &SolverOptions) -> SearchOutcome {
    let mut solver = Dpll::new(cnf.clone(), *options);
    solver.search()
}

/// A node waiting for the result of its branches.
#[derive(Debug, Clone)]
struct Frame {
    clauses: Vec<Clause>,
    assignment: Assignment,
    var: Variable,
    /// The branch value still to try, `true` before `false`.
    next: Option<bool>,
}

impl Frame {
    /// Takes the next untried branch of this frame.
    ///
    /// The outer `None` means both branches were tried. The inner result is
    /// the child's clause set and assignment, or the conflict found while
    /// assigning the branch literal.
    fn next_branch(&mut self) -> Option<std::result::Result<(Vec<Clause>, Assignment), Conflict>> {
        let value = self.next?;
        self.next = value.then_some(false);

        let literal = Literal::new(self.var, value);
        let mut assignment = self.assignment.clone();
        Some(
            assignment
                .assign(literal)
                .and_then(|_| assign_literal(&self.clauses, literal))
                .map(|clauses| (clauses, assignment)),
        )
    }
}

enum Node {
    Satisfied(Assignment),
    Failed,
    Branch(Frame),
    Aborted,
}

/// Represents a DPLL SAT solver.
///
/// Holds the formula, the configured simplifiers and variable selector, and
/// the counters of the last search.
#[derive(Debug, Clone)]
pub struct Dpll {
    pub cnf: Cnf,
    pub options: SolverOptions,
    pub selector: VariableSelectionImpls,
    pub unit: UnitPropagation,
    pub pure: PureLiteralElimination,
    decisions: usize,
    conflicts: usize,
    propagations: usize,
    outcome: Option<SearchOutcome>,
}

impl Dpll {
    /// Runs the search from the root and returns its outcome.
    ///
    /// Counters restart from zero on every call.
    pub fn search(&mut self) -> SearchOutcome {
        self.decisions = 0;
        self.conflicts = 0;
        self.propagations = 0;

        let root = (
            self.cnf.clauses.clone(),
            Assignment::new(self.cnf.variables().len()),
        );

        let (verdict, assignment) = match self.run(root) {
            Some(Some(assignment)) => (
                Verdict::Sat,
                assignment.complete(self.cnf.variables().iter().copied()),
            ),
            Some(None) => (Verdict::Unsat, Solutions::default()),
            None => (Verdict::Unknown, Solutions::default()),
        };

        tracing::info!(
            %verdict,
            decisions = self.decisions,
            conflicts = self.conflicts,
            "search finished"
        );

        let outcome = SearchOutcome {
            verdict,
            assignment,
            decisions: self.decisions,
            conflicts: self.conflicts,
        };
        self.outcome = Some(outcome.clone());
        outcome
    }

    /// Drives the explicit stack.
    ///
    /// `Some(Some(a))` is a satisfying assignment, `Some(None)` a failed root
    /// and `None` an aborted search.
    fn run(&mut self, root: (Vec<Clause>, Assignment)) -> Option<Option<Assignment>> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut pending = Some(root);

        loop {
            if let Some((clauses, assignment)) = pending.take() {
                match self.enter(clauses, assignment) {
                    Node::Satisfied(assignment) => return Some(Some(assignment)),
                    Node::Aborted => return None,
                    Node::Failed => {}
                    Node::Branch(frame) => {
                        tracing::debug!(
                            var = frame.var,
                            depth = stack.len(),
                            decisions = self.decisions,
                            "decision"
                        );
                        stack.push(frame);
                    }
                }
            }

            // Resume the deepest frame with an untried branch.
            while pending.is_none() {
                let Some(frame) = stack.last_mut() else {
                    return Some(None);
                };
                match frame.next_branch() {
                    Some(Ok(child)) => pending = Some(child),
                    Some(Err(Conflict)) => self.conflicts += 1,
                    None => {
                        stack.pop();
                        self.conflicts += 1;
                        tracing::trace!(depth = stack.len(), "backtrack");
                    }
                }
            }
        }
    }

    /// Simplifies a node and decides what to do with it.
    fn enter(&mut self, clauses: Vec<Clause>, mut assignment: Assignment) -> Node {
        if clauses.iter().any(Clause::is_empty) {
            self.conflicts += 1;
            return Node::Failed;
        }

        let Ok(reduced) = self.unit.simplify(clauses, &mut assignment) else {
            self.conflicts += 1;
            return Node::Failed;
        };
        self.propagations += reduced.assigned;

        let Ok(reduced) = self.pure.simplify(reduced.clauses, &mut assignment) else {
            self.conflicts += 1;
            return Node::Failed;
        };
        self.propagations += reduced.assigned;

        let clauses = reduced.clauses;
        if clauses.is_empty() {
            return Node::Satisfied(assignment);
        }

        if self
            .options
            .decision_limit
            .is_some_and(|limit| self.decisions >= limit)
        {
            tracing::warn!(decisions = self.decisions, "decision limit reached, aborting search");
            return Node::Aborted;
        }

        let Some(var) = self.selector.pick(&clauses, &assignment) else {
            self.conflicts += 1;
            return Node::Failed;
        };
        self.decisions += 1;

        Node::Branch(Frame {
            clauses,
            assignment,
            var,
            next: Some(true),
        })
    }
}

impl Solver for Dpll {
    fn new(cnf: Cnf, options: SolverOptions) -> Self {
        Self {
            selector: options.selection.to_impl(options.seed),
            pure: PureLiteralElimination::new(options.pure_literals),
            unit: UnitPropagation,
            cnf,
            options,
            decisions: 0,
            conflicts: 0,
            propagations: 0,
            outcome: None,
        }
    }

    fn solve(&mut self) -> Result<Verdict> {
        Ok(self.search().verdict)
    }

    fn solutions(&self) -> Option<Solutions> {
        self.outcome
            .as_ref()
            .filter(|outcome| outcome.satisfiable())
            .map(|outcome| outcome.assignment.clone())
    }

    fn stats(&self) -> SolutionStats {
        SolutionStats {
            decisions: self.decisions,
            conflicts: self.conflicts,
            propagations: self.propagations,
            eliminations: 0,
        }
    }
}
