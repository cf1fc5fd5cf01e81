#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching-variable policies for the backtracking engine.
//!
//! Every policy returns a variable that occurs in the current clause set and
//! is unassigned, so any of them keeps the search complete. They differ only
//! in the shape of the search tree.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::literal::Variable;
use clap::ValueEnum;
use core::cell::RefCell;
use core::fmt;
use itertools::Itertools;

pub trait VariableSelection: fmt::Debug {
    fn pick(&self, clauses: &[Clause], assignment: &Assignment) -> Option<Variable>;
}

fn candidates<'a>(
    clauses: &'a [Clause],
    assignment: &'a Assignment,
) -> impl Iterator<Item = Variable> + 'a {
    clauses
        .iter()
        .flat_map(Clause::variables)
        .filter(|&var| !assignment.is_assigned(var))
}

/// The first unassigned variable met scanning clauses, then literals, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirstOccurrence;

impl VariableSelection for FirstOccurrence {
    fn pick(&self, clauses: &[Clause], assignment: &Assignment) -> Option<Variable> {
        candidates(clauses, assignment).next()
    }
}

/// The lowest-numbered unassigned variable in the clause set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOrder;

impl VariableSelection for FixedOrder {
    fn pick(&self, clauses: &[Clause], assignment: &Assignment) -> Option<Variable> {
        candidates(clauses, assignment).min()
    }
}

/// A uniformly random candidate from a seeded generator.
///
/// The same seed reproduces the same sequence of picks.
#[derive(Debug, Clone)]
pub struct RandomOrder {
    rng: RefCell<fastrand::Rng>,
}

impl RandomOrder {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl Default for RandomOrder {
    fn default() -> Self {
        Self::new(0)
    }
}

impl VariableSelection for RandomOrder {
    fn pick(&self, clauses: &[Clause], assignment: &Assignment) -> Option<Variable> {
        let vars = candidates(clauses, assignment)
            .sorted_unstable()
            .dedup()
            .collect_vec();
        if vars.is_empty() {
            return None;
        }
        let i = self.rng.borrow_mut().usize(..vars.len());
        Some(vars[i])
    }
}

/// Command-line name of a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum VariableSelectionType {
    #[default]
    First,
    Fixed,
    Random,
}

impl fmt::Display for VariableSelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Fixed => write!(f, "fixed"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl VariableSelectionType {
    #[must_use]
    pub fn to_impl(self, seed: u64) -> VariableSelectionImpls {
        match self {
            Self::First => VariableSelectionImpls::First(FirstOccurrence),
            Self::Fixed => VariableSelectionImpls::Fixed(FixedOrder),
            Self::Random => VariableSelectionImpls::Random(RandomOrder::new(seed)),
        }
    }
}

/// Static dispatch over the available policies.
#[derive(Debug, Clone)]
pub enum VariableSelectionImpls {
    First(FirstOccurrence),
    Fixed(FixedOrder),
    Random(RandomOrder),
}

impl Default for VariableSelectionImpls {
    fn default() -> Self {
        Self::First(FirstOccurrence)
    }
}

impl VariableSelection for VariableSelectionImpls {
    fn pick(&self, clauses: &[Clause], assignment: &Assignment) -> Option<Variable> {
        match self {
            Self::First(s) => s.pick(clauses, assignment),
            Self::Fixed(s) => s.pick(clauses, assignment),
            Self::Random(s) => s.pick(clauses, assignment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::cnf::Cnf;
    use crate::sat::literal::Literal;

    fn clauses() -> Vec<Clause> {
        Cnf::new(vec![vec![4, -2], vec![3, 1], vec![-4, 5]])
            .unwrap()
            .clauses
    }

    #[test]
    fn test_first_occurrence() {
        let cs = clauses();
        let mut assignment = Assignment::new(5);
        // Canonical order puts -2 before 4 in the first clause.
        assert_eq!(FirstOccurrence.pick(&cs, &assignment), Some(2));
        assignment.assign(Literal::new(2, true)).unwrap();
        assert_eq!(FirstOccurrence.pick(&cs, &assignment), Some(4));
    }

    #[test]
    fn test_fixed_order() {
        let cs = clauses();
        let assignment = Assignment::new(5);
        assert_eq!(FixedOrder.pick(&cs, &assignment), Some(1));
    }

    #[test]
    fn test_random_is_reproducible_and_valid() {
        let cs = clauses();
        let assignment = Assignment::new(5);
        let a = RandomOrder::new(42);
        let b = RandomOrder::new(42);
        for _ in 0..20 {
            let picked = a.pick(&cs, &assignment);
            assert_eq!(picked, b.pick(&cs, &assignment));
            assert!(matches!(picked, Some(1..=5)));
        }
    }

    #[test]
    fn test_none_when_everything_assigned() {
        let cs = clauses();
        let mut assignment = Assignment::new(5);
        for var in 1..=5 {
            assignment.assign(Literal::new(var, true)).unwrap();
        }
        assert_eq!(FirstOccurrence.pick(&cs, &assignment), None);
        assert_eq!(FixedOrder.pick(&cs, &assignment), None);
        assert_eq!(RandomOrder::default().pick(&cs, &assignment), None);
        assert_eq!(VariableSelectionType::Random.to_impl(1).pick(&[], &assignment), None);
    }
}
