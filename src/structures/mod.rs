//! Structures which represent the abstract elements of a solve.
//!
//! - [Atoms](atom), the elementary assertions `v = k` and `v ≠ k`.
//! - [Clauses](clause), disjunctions of atoms.

pub mod atom;
pub mod clause;
