#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clauses in canonical form.
//!
//! A clause is a disjunction of literals stored sorted (by variable, negative
//! first) and without duplicates. Two clauses built from the same literals in
//! any order compare and hash equal, which lets a formula be treated as a set
//! of clauses.

use crate::sat::assignment::Assignment;
use crate::sat::literal::{Literal, Variable};
use core::fmt;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;

pub type LiteralStorage = SmallVec<[Literal; 8]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: LiteralStorage,
}

impl Clause {
    /// Builds a clause, sorting and deduplicating the literals.
    #[must_use]
    pub fn new<I: IntoIterator<Item = Literal>>(literals: I) -> Self {
        let mut literals: LiteralStorage = literals.into_iter().collect();
        literals.sort_unstable();
        literals.dedup();
        Self { literals }
    }

    /// The empty clause.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// `true` for the empty clause, which can never be satisfied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// The single literal of a unit clause.
    #[must_use]
    pub fn unit_literal(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [lit] => Some(*lit),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.literals.iter().map(|lit| lit.variable()).dedup()
    }

    #[must_use]
    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.binary_search(&literal).is_ok()
    }

    #[must_use]
    pub fn mentions(&self, var: Variable) -> bool {
        self.contains(Literal::new(var, true)) || self.contains(Literal::new(var, false))
    }

    /// A clause holding both a literal and its negation is always true.
    ///
    /// Complementary literals sit next to each other in canonical order.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .tuple_windows()
            .any(|(a, b)| a.variable() == b.variable())
    }

    /// A copy of this clause with `literal` removed.
    #[must_use]
    pub fn without(&self, literal: Literal) -> Self {
        Self {
            literals: self
                .literals
                .iter()
                .copied()
                .filter(|&lit| lit != literal)
                .collect(),
        }
    }

    /// Resolves `self` (holding `+var`) with `other` (holding `-var`) on `var`.
    ///
    /// The result is the union of both clauses minus the literals of `var`.
    /// It may be a tautology; callers decide whether to keep it.
    #[must_use]
    pub fn resolve(&self, other: &Self, var: Variable) -> Self {
        Self::new(
            self.literals
                .iter()
                .merge(other.literals.iter())
                .copied()
                .filter(|lit| lit.variable() != var),
        )
    }

    /// Whether some literal of the clause is true under `assignment`.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals
            .iter()
            .any(|&lit| assignment.literal_value(lit) == Some(true))
    }

    #[must_use]
    pub fn to_i32s(&self) -> Vec<i32> {
        self.literals.iter().map(|lit| lit.to_i32()).collect()
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Self::new(literals)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = core::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lit in &self.literals {
            write!(f, "{lit} ")?;
        }
        write!(f, "0")
    }
}
