#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The Davis-Putnam (DP) decision procedure.
//!
//! DP simplifies the formula once with unit propagation and pure-literal
//! elimination, then eliminates the remaining variables one at a time by
//! resolution:
//!
//! 1.  Split the clauses into those containing `+v`, those containing `-v` and
//!     the rest.
//! 2.  Resolve every `+v` clause with every `-v` clause, discarding
//!     tautological resolvents.
//! 3.  Replace the clause set with the rest plus the resolvents. `v` no longer
//!     occurs.
//!
//! An empty resolvent proves the formula unsatisfiable; an empty clause set
//! proves it satisfiable. Since every clause mentions some variable, one of
//! the two always happens before the variables run out.
//!
//! DP is a decision procedure only. The partial assignment it returns holds
//! just the literals forced by the initial simplification.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::error::{Error, Result};
use crate::sat::literal::{Literal, Variable};
use crate::sat::simplify::{PureLiteralElimination, Simplifier, UnitPropagation};
use crate::sat::solver::{SolutionStats, Solutions, Solver, SolverOptions, Verdict};
use itertools::Itertools;
use rustc_hash::FxHashSet;

/// Result of [`solve_by_elimination`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EliminationOutcome {
    pub verdict: Verdict,
    /// Variables processed by the elimination loop.
    pub steps: usize,
    /// Literals forced by unit propagation and pure-literal elimination.
    pub assignment: Assignment,
}

/// Decides `cnf` by variable elimination with default options.
///
/// # Errors
///
/// [`Error::Exhausted`] if elimination finishes without reaching a verdict,
/// which indicates a bug rather than a property of the input.
pub fn solve_by_elimination(cnf: &Cnf) -> Result<EliminationOutcome> {
    solve_by_elimination_with(cnf, &SolverOptions::default())
}

/// Decides `cnf` by variable elimination.
///
/// Assumes a well-formed formula: every literal is non-zero, which [`Cnf`]
/// guarantees by construction.
///
/// # Errors
///
/// See [`solve_by_elimination`].
pub fn solve_by_elimination_with(
    cnf: &Cnf,
    options: &SolverOptions,
) -> Result<EliminationOutcome> {
    let mut assignment = Assignment::new(cnf.variables().len());
    let finish = |verdict: Verdict, steps: usize, assignment: Assignment| {
        tracing::info!(%verdict, steps, "variable elimination finished");
        Ok(EliminationOutcome {
            verdict,
            steps,
            assignment,
        })
    };

    if cnf.has_empty_clause() {
        return finish(Verdict::Unsat, 0, assignment);
    }

    let mut clauses = cnf.clauses.clone();

    if clauses.iter().any(Clause::is_unit) {
        match UnitPropagation.simplify(clauses, &mut assignment) {
            Ok(reduced) => clauses = reduced.clauses,
            Err(_) => return finish(Verdict::Unsat, 0, assignment),
        }
    }

    if PureLiteralElimination::has_pure_literal(&clauses) {
        let pure = PureLiteralElimination::new(options.pure_literals);
        match pure.simplify(clauses, &mut assignment) {
            Ok(reduced) => clauses = reduced.clauses,
            Err(_) => return finish(Verdict::Unsat, 0, assignment),
        }
    }

    if clauses.is_empty() {
        return finish(Verdict::Sat, 0, assignment);
    }

    let variables = clauses
        .iter()
        .flat_map(Clause::variables)
        .sorted_unstable()
        .dedup()
        .collect_vec();
    let mut steps = 0;

    for var in variables {
        if assignment.is_assigned(var) {
            continue;
        }
        steps += 1;

        let Elimination {
            clauses: next,
            derived_empty,
        } = eliminate(clauses, var);
        clauses = next;

        tracing::debug!(var, steps, clauses = clauses.len(), "variable eliminated");

        if derived_empty {
            return finish(Verdict::Unsat, steps, assignment);
        }
        if clauses.is_empty() {
            return finish(Verdict::Sat, steps, assignment);
        }
        if options.clause_limit.is_some_and(|limit| clauses.len() > limit) {
            tracing::warn!(
                clauses = clauses.len(),
                "clause limit exceeded, abandoning elimination"
            );
            return finish(Verdict::Unknown, steps, assignment);
        }
    }

    tracing::error!(
        remaining = clauses.len(),
        steps,
        "variable elimination exhausted every variable without a verdict"
    );
    Err(Error::Exhausted {
        remaining: clauses.len(),
    })
}

struct Elimination {
    clauses: Vec<Clause>,
    derived_empty: bool,
}

/// Replaces every clause mentioning `var` by the non-tautological resolvents
/// on `var`.
fn eliminate(clauses: Vec<Clause>, var: Variable) -> Elimination {
    let positive = Literal::new(var, true);
    let negative = Literal::new(var, false);

    let mut pos = Vec::new();
    let mut neg = Vec::new();
    let mut rest = Vec::with_capacity(clauses.len());

    for clause in clauses {
        if clause.contains(positive) {
            pos.push(clause);
        } else if clause.contains(negative) {
            neg.push(clause);
        } else {
            rest.push(clause);
        }
    }

    let mut seen: FxHashSet<Clause> = rest.iter().cloned().collect();
    let mut derived_empty = false;

    for p in &pos {
        for n in &neg {
            let resolvent = p.resolve(n, var);
            if resolvent.is_tautology() {
                continue;
            }
            derived_empty |= resolvent.is_empty();
            if seen.insert(resolvent.clone()) {
                rest.push(resolvent);
            }
        }
    }

    tracing::trace!(var, pos = pos.len(), neg = neg.len(), "resolved");

    Elimination {
        clauses: rest,
        derived_empty,
    }
}

/// [`Solver`] wrapper around [`solve_by_elimination_with`].
#[derive(Debug, Clone)]
pub struct Dp {
    pub cnf: Cnf,
    pub options: SolverOptions,
    outcome: Option<EliminationOutcome>,
}

impl Solver for Dp {
    fn new(cnf: Cnf, options: SolverOptions) -> Self {
        Self {
            cnf,
            options,
            outcome: None,
        }
    }

    fn solve(&mut self) -> Result<Verdict> {
        let outcome = solve_by_elimination_with(&self.cnf, &self.options)?;
        let verdict = outcome.verdict;
        self.outcome = Some(outcome);
        Ok(verdict)
    }

    /// DP proves satisfiability without building a model.
    fn solutions(&self) -> Option<Solutions> {
        None
    }

    fn stats(&self) -> SolutionStats {
        self.outcome
            .as_ref()
            .map_or_else(SolutionStats::default, |outcome| SolutionStats {
                eliminations: outcome.steps,
                propagations: outcome.assignment.len(),
                ..SolutionStats::default()
            })
    }
}
