//! Two complete decision procedures for propositional satisfiability over
//! formulas in conjunctive normal form: Davis-Putnam variable elimination and
//! DPLL backtracking search.

/// The `sat` module holds the formula representation, the simplification
/// rules shared by both engines, the engines themselves and the DIMACS reader.
pub mod sat;
