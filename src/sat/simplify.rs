#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Simplification rules shared by both engines.
//!
//! Every rule takes the current clause set by value and returns a new one,
//! recording the literals it forces in the caller's [`Assignment`]. The
//! simplified set is satisfiable exactly when the input is, relative to the
//! recorded partial assignment.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::error::Conflict;
use crate::sat::literal::Literal;
use crate::sat::solver::PureLiteralMode;
use rustc_hash::FxHashSet;
use std::fmt::Debug;

/// Result of a simplification pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reduced {
    pub clauses: Vec<Clause>,
    /// Number of variables the pass bound.
    pub assigned: usize,
}

pub trait Simplifier: Debug {
    /// Applies the rule to `clauses`.
    ///
    /// # Errors
    ///
    /// [`Conflict`] when the rule proves the clause set unsatisfiable under
    /// `assignment`.
    fn simplify(
        &self,
        clauses: Vec<Clause>,
        assignment: &mut Assignment,
    ) -> Result<Reduced, Conflict>;
}

/// Makes `literal` true in `clauses`.
///
/// Clauses containing `literal` are satisfied and dropped; its negation is
/// removed from the others.
///
/// # Errors
///
/// [`Conflict`] if removing the negation empties a clause.
pub fn assign_literal(clauses: &[Clause], literal: Literal) -> Result<Vec<Clause>, Conflict> {
    let negated = literal.negated();
    let mut simplified = Vec::with_capacity(clauses.len());

    for clause in clauses {
        if clause.contains(literal) {
            continue;
        }
        if clause.contains(negated) {
            let shortened = clause.without(negated);
            if shortened.is_empty() {
                return Err(Conflict);
            }
            simplified.push(shortened);
        } else {
            simplified.push(clause.clone());
        }
    }

    Ok(simplified)
}

/// Unit propagation to a fixed point.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct UnitPropagation;

impl Simplifier for UnitPropagation {
    fn simplify(
        &self,
        mut clauses: Vec<Clause>,
        assignment: &mut Assignment,
    ) -> Result<Reduced, Conflict> {
        let mut assigned = 0;

        while let Some(unit) = clauses.iter().find_map(Clause::unit_literal) {
            if assignment.assign(unit)? {
                tracing::trace!(literal = unit.to_i32(), "unit propagated");
                assigned += 1;
            }
            clauses = assign_literal(&clauses, unit)?;
        }

        Ok(Reduced { clauses, assigned })
    }
}

/// Assigns every pure literal and drops the clauses it satisfies.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PureLiteralElimination {
    pub mode: PureLiteralMode,
}

impl PureLiteralElimination {
    #[must_use]
    pub const fn new(mode: PureLiteralMode) -> Self {
        Self { mode }
    }

    /// Literals whose negation occurs nowhere in `clauses`, in order of first
    /// occurrence.
    #[must_use]
    pub fn find_pures(clauses: &[Clause]) -> Vec<Literal> {
        let occurring: FxHashSet<Literal> = clauses.iter().flat_map(Clause::iter).copied().collect();
        let mut seen = FxHashSet::default();

        clauses
            .iter()
            .flat_map(Clause::iter)
            .copied()
            .filter(|lit| !occurring.contains(&lit.negated()))
            .filter(|&lit| seen.insert(lit))
            .collect()
    }

    #[must_use]
    pub fn has_pure_literal(clauses: &[Clause]) -> bool {
        !Self::find_pures(clauses).is_empty()
    }

    fn eliminate_once(clauses: Vec<Clause>, assignment: &mut Assignment) -> Reduced {
        let pures: FxHashSet<Literal> = Self::find_pures(&clauses)
            .into_iter()
            .filter(|&lit| assignment.assign(lit) == Ok(true))
            .inspect(|lit| tracing::trace!(literal = lit.to_i32(), "pure literal assigned"))
            .collect();

        if pures.is_empty() {
            return Reduced {
                clauses,
                assigned: 0,
            };
        }

        let clauses = clauses
            .into_iter()
            .filter(|clause| !clause.iter().any(|lit| pures.contains(lit)))
            .collect();

        Reduced {
            clauses,
            assigned: pures.len(),
        }
    }
}

impl Simplifier for PureLiteralElimination {
    fn simplify(
        &self,
        clauses: Vec<Clause>,
        assignment: &mut Assignment,
    ) -> Result<Reduced, Conflict> {
        let mut reduced = Self::eliminate_once(clauses, assignment);

        if self.mode == PureLiteralMode::FixedPoint {
            let mut last = reduced.assigned;
            while last > 0 {
                let next = Self::eliminate_once(reduced.clauses, assignment);
                last = next.assigned;
                reduced = Reduced {
                    clauses: next.clauses,
                    assigned: reduced.assigned + next.assigned,
                };
            }
        }

        Ok(reduced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::cnf::Cnf;
    use itertools::Itertools;

    fn clauses(values: Vec<Vec<i32>>) -> Vec<Clause> {
        Cnf::new(values).unwrap().clauses
    }

    fn lit(value: i32) -> Literal {
        Literal::from_i32(value).unwrap()
    }

    fn as_i32s(clauses: &[Clause]) -> Vec<Vec<i32>> {
        clauses.iter().map(Clause::to_i32s).collect()
    }

    #[test]
    fn test_assign_literal() {
        let cs = clauses(vec![vec![1, 2], vec![-1, 3], vec![2, 3]]);
        let result = assign_literal(&cs, lit(1)).unwrap();
        assert_eq!(as_i32s(&result), vec![vec![3], vec![2, 3]]);
    }

    #[test]
    fn test_assign_literal_conflict() {
        let cs = clauses(vec![vec![-1], vec![1, 2]]);
        assert_eq!(assign_literal(&cs, lit(1)), Err(Conflict));
    }

    #[test]
    fn test_unit_propagation_chain() {
        let cs = clauses(vec![vec![1], vec![-1, 2], vec![-2, 3, 4], vec![5, 6]]);
        let mut assignment = Assignment::new(6);
        let reduced = UnitPropagation.simplify(cs, &mut assignment).unwrap();

        assert_eq!(as_i32s(&reduced.clauses), vec![vec![3, 4], vec![5, 6]]);
        assert_eq!(reduced.assigned, 2);
        assert_eq!(assignment.var_value(1), Some(true));
        assert_eq!(assignment.var_value(2), Some(true));
    }

    #[test]
    fn test_unit_propagation_conflict() {
        let cs = clauses(vec![vec![1], vec![-1]]);
        let mut assignment = Assignment::new(1);
        assert_eq!(UnitPropagation.simplify(cs, &mut assignment), Err(Conflict));
    }

    #[test]
    fn test_unit_propagation_contradicts_assignment() {
        let cs = clauses(vec![vec![-1, 2], vec![-2]]);
        let mut assignment = Assignment::new(2);
        assignment.assign(lit(2)).unwrap();
        assert_eq!(UnitPropagation.simplify(cs, &mut assignment), Err(Conflict));
    }

    #[test]
    fn test_unit_propagation_without_units_is_identity() {
        let cs = clauses(vec![vec![1, 2], vec![-1, -2]]);
        let mut assignment = Assignment::new(2);
        let reduced = UnitPropagation.simplify(cs.clone(), &mut assignment).unwrap();
        assert_eq!(reduced.clauses, cs);
        assert_eq!(reduced.assigned, 0);
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_unit_propagation_is_monotonic() {
        let cs = clauses(vec![vec![1], vec![-1, 2, 3], vec![2, -3], vec![-2, 4]]);
        let before = cs.len();
        let mut assignment = Assignment::new(4);
        let reduced = UnitPropagation.simplify(cs, &mut assignment).unwrap();

        assert!(reduced.clauses.len() <= before);
        let remaining = reduced
            .clauses
            .iter()
            .flat_map(Clause::variables)
            .collect_vec();
        assert!(remaining.iter().all(|&var| !assignment.is_assigned(var)));
    }

    #[test]
    fn test_find_pures() {
        let cs = clauses(vec![vec![1, -2], vec![-1, -2, 3], vec![-3, 4]]);
        let pures = PureLiteralElimination::find_pures(&cs);
        assert_eq!(pures, vec![lit(-2), lit(4)]);
    }

    #[test]
    fn test_pure_literal_elimination_once() {
        let cs = clauses(vec![vec![1, -2], vec![-1, -2, 3], vec![-3, 4]]);
        let mut assignment = Assignment::new(4);
        let reduced = PureLiteralElimination::default()
            .simplify(cs, &mut assignment)
            .unwrap();

        assert!(reduced.clauses.is_empty());
        assert_eq!(reduced.assigned, 2);
        assert_eq!(assignment.var_value(2), Some(false));
        assert_eq!(assignment.var_value(4), Some(true));
    }

    #[test]
    fn test_pure_literal_fixed_point() {
        // Removing the clauses of pure 3 makes 1 pure, which then satisfies the rest.
        let cs = clauses(vec![vec![1, 2], vec![-1, 3], vec![1, -2]]);

        let mut once = Assignment::new(3);
        let reduced = PureLiteralElimination::new(PureLiteralMode::Once)
            .simplify(cs.clone(), &mut once)
            .unwrap();
        assert_eq!(as_i32s(&reduced.clauses), vec![vec![1, 2], vec![1, -2]]);

        let mut fixed = Assignment::new(3);
        let reduced = PureLiteralElimination::new(PureLiteralMode::FixedPoint)
            .simplify(cs, &mut fixed)
            .unwrap();
        assert!(reduced.clauses.is_empty());
        assert_eq!(fixed.var_value(1), Some(true));
        assert_eq!(fixed.var_value(3), Some(true));
    }

    #[test]
    fn test_pure_literal_skips_assigned_variables() {
        let cs = clauses(vec![vec![1, 2]]);
        let mut assignment = Assignment::new(2);
        assignment.assign(lit(-1)).unwrap();
        let reduced = PureLiteralElimination::default()
            .simplify(cs, &mut assignment)
            .unwrap();

        assert!(reduced.clauses.is_empty());
        assert_eq!(reduced.assigned, 1);
        assert_eq!(assignment.var_value(1), Some(false));
        assert_eq!(assignment.var_value(2), Some(true));
    }
}
