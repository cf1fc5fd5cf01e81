#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literals: signed references to propositional variables.
//!
//! A literal follows the DIMACS convention. Its absolute value names the
//! variable and its sign the polarity, so `3` asserts variable 3 true and `-3`
//! asserts it false. The value `0` is a clause terminator in the text format
//! and can never be stored in a `Literal`.

use core::cmp::Ordering;
use core::fmt;
use core::num::NonZeroI32;
use core::ops::{Neg, Not};

/// A propositional variable identifier. Always strictly positive.
pub type Variable = u32;

/// A non-zero signed variable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal(NonZeroI32);

impl Literal {
    /// Builds a literal for `var` with the given polarity.
    ///
    /// # Panics
    ///
    /// If `var` is `0` or does not fit in an `i32`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        let magnitude = i32::try_from(var).expect("variable does not fit in a DIMACS literal");
        let value = if polarity { magnitude } else { -magnitude };
        Self(NonZeroI32::new(value).expect("variable 0 is reserved"))
    }

    /// Converts a DIMACS integer.
    ///
    /// Returns `None` for the terminator `0` and for `i32::MIN`, whose
    /// negation does not fit in an `i32`.
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        if value == i32::MIN {
            return None;
        }
        match NonZeroI32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0.get()
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.get().unsigned_abs()
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.get() > 0
    }

    #[must_use]
    pub const fn is_negated(self) -> bool {
        !self.polarity()
    }

    #[must_use]
    pub fn negated(self) -> Self {
        Self(-self.0)
    }

    /// The truth value the literal takes when its variable is `value`.
    #[must_use]
    pub const fn evaluate(self, value: bool) -> bool {
        value == self.polarity()
    }
}

/// Literals order by variable first, negative before positive, which keeps
/// complementary literals adjacent inside a sorted clause.
impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.variable()
            .cmp(&other.variable())
            .then(self.polarity().cmp(&other.polarity()))
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Neg for &Literal {
    type Output = Literal;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Literal {
    type Error = crate::sat::error::Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        use crate::sat::error::Error;

        match value {
            0 => Err(Error::ZeroLiteral),
            _ => Self::from_i32(value).ok_or(Error::LiteralOutOfRange { value }),
        }
    }
}

impl From<Literal> for i32 {
    fn from(literal: Literal) -> Self {
        literal.to_i32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(Literal::new(1, false).negated(), Literal::new(1, true));
        assert_eq!(-Literal::new(1, true), Literal::new(1, false));
        assert_eq!(!Literal::new(4, true), Literal::new(4, false));
    }

    #[test]
    fn test_from_i32() {
        let lit = Literal::from_i32(-7).unwrap();
        assert_eq!(lit.variable(), 7);
        assert!(!lit.polarity());
        assert!(lit.is_negated());
        assert_eq!(lit.to_i32(), -7);
        assert_eq!(Literal::from_i32(0), None);
        assert!(Literal::try_from(0).is_err());
    }

    #[test]
    fn test_extreme_values() {
        assert_eq!(Literal::from_i32(i32::MIN), None);
        assert!(matches!(
            Literal::try_from(i32::MIN),
            Err(crate::sat::error::Error::LiteralOutOfRange { value: i32::MIN })
        ));

        let lit = Literal::try_from(-i32::MAX).unwrap();
        assert_eq!(lit.variable(), i32::MAX.unsigned_abs());
        assert_eq!(lit.negated().to_i32(), i32::MAX);
    }

    #[test]
    fn test_evaluate() {
        assert!(Literal::new(2, true).evaluate(true));
        assert!(!Literal::new(2, true).evaluate(false));
        assert!(Literal::new(2, false).evaluate(false));
    }

    #[test]
    fn test_ordering_keeps_complements_adjacent() {
        let mut lits: Vec<Literal> = [3, -1, 2, 1, -3]
            .into_iter()
            .filter_map(Literal::from_i32)
            .collect();
        lits.sort();
        let values: Vec<i32> = lits.into_iter().map(Literal::to_i32).collect();
        assert_eq!(values, vec![-1, 1, 2, -3, 3]);
    }
}
