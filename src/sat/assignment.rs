#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Partial truth assignments and the models built from them.
//!
//! An [`Assignment`] is owned by a single search path. Branching clones it so
//! sibling branches never observe each other's tentative values.

use crate::sat::error::Conflict;
use crate::sat::literal::{Literal, Variable};
use core::fmt;
use core::ops::Index;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::collections::hash_map::Entry;

#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }

    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::Assigned(true))
    }

    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::Assigned(false))
    }
}

/// A partial mapping from variable to truth value.
///
/// Only bound variables are stored, so the cost of an assignment (and of
/// cloning it at every branch) follows the number of bound variables, not the
/// largest variable id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(FxHashMap<Variable, bool>);

impl Index<Variable> for Assignment {
    type Output = VarState;

    fn index(&self, index: Variable) -> &Self::Output {
        match self.0.get(&index) {
            Some(true) => &VarState::Assigned(true),
            Some(false) => &VarState::Assigned(false),
            None => &VarState::Unassigned,
        }
    }
}

impl Assignment {
    /// An empty assignment with room for `capacity` variables.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self(FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher))
    }

    /// Makes `literal` true.
    ///
    /// Returns `Ok(true)` if the variable was newly bound, `Ok(false)` if it
    /// already held the same value.
    ///
    /// # Errors
    ///
    /// [`Conflict`] if the variable is already bound to the opposite value.
    pub fn assign(&mut self, literal: Literal) -> Result<bool, Conflict> {
        match self.0.entry(literal.variable()) {
            Entry::Vacant(slot) => {
                slot.insert(literal.polarity());
                Ok(true)
            }
            Entry::Occupied(slot) if *slot.get() == literal.polarity() => Ok(false),
            Entry::Occupied(_) => Err(Conflict),
        }
    }

    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        self.0.get(&var).copied()
    }

    /// Truth value of `literal`, or `None` while its variable is unassigned.
    #[must_use]
    pub fn literal_value(&self, literal: Literal) -> Option<bool> {
        self.var_value(literal.variable())
            .map(|value| literal.evaluate(value))
    }

    #[must_use]
    pub fn is_assigned(&self, var: Variable) -> bool {
        self.0.contains_key(&var)
    }

    /// Number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bound variables as literals that are true, in no particular order.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.0.iter().map(|(&var, &value)| Literal::new(var, value))
    }

    /// Completes the assignment over `variables` and returns the model.
    ///
    /// Variables never bound on the successful path are unconstrained and
    /// default to `false`.
    #[must_use]
    pub fn complete<I: IntoIterator<Item = Variable>>(&self, variables: I) -> Solutions {
        let mut literals: Vec<Literal> = self.literals().collect();
        literals.extend(
            variables
                .into_iter()
                .filter(|&var| !self.is_assigned(var))
                .map(|var| Literal::new(var, false)),
        );
        Solutions::new(literals)
    }

    /// The bound variables only, without completion.
    #[must_use]
    pub fn get_solutions(&self) -> Solutions {
        Solutions::new(self.literals().collect())
    }
}

/// A model: one true literal per assigned variable, ordered by variable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Solutions(Vec<Literal>);

impl Solutions {
    #[must_use]
    pub fn new(mut literals: Vec<Literal>) -> Self {
        literals.sort_unstable();
        literals.dedup();
        Self(literals)
    }

    /// Value of `var` in the model, `None` if the model does not mention it.
    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        self.0
            .binary_search_by_key(&var, |lit| lit.variable())
            .ok()
            .map(|i| self.0[i].polarity())
    }

    /// Whether `literal` is true in the model.
    #[must_use]
    pub fn check(&self, literal: Literal) -> bool {
        self.value(literal.variable()) == Some(literal.polarity())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn to_i32s(&self) -> Vec<i32> {
        self.0.iter().map(|lit| lit.to_i32()).collect()
    }
}

impl fmt::Display for Solutions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lit in &self.0 {
            write!(f, "{lit} ")?;
        }
        write!(f, "0")
    }
}

impl FromIterator<Literal> for Solutions {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
