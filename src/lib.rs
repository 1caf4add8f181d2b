//! A library for determining the satisfiability of conjunctions of clauses over finite-domain equality atoms.
//!
//! A problem is given by a collection of variables, each with a finite integer domain
//! `{0, …, d − 1}`, together with a conjunction of clauses.
//! Each clause is a disjunction of atoms, and each atom asserts either that a variable takes a
//! value (`v = k`) or that it does not (`v ≠ k`).
//!
//! The solver decides satisfiability with a conflict-driven search extended to multi-valued
//! variables: committing `v = k` forbids `v = k'` for every other `k'` of the domain, and a
//! variable with a single domain value left is forced to take it (entailment).
//! Conflicts are analysed by resolution to learn an asserting clause, and search resumes from a
//! non-chronologically chosen level, optionally restarting after a fixed number of backtracks.
//!
//! # Orientation
//!
//! Internally a solve is viewed as the manipulation of a handful of databases:
//! - The formula is stored in a [clause database](crate::db::clause).
//! - The status of every `(variable, value)` pair is stored in a
//!   [variable database](crate::db::variable).
//! - The chronological record of status changes is the [trail](crate::db::trail).
//!
//! The algorithm itself is factored into a collection of [procedures], each a method on a
//! [Context](crate::context::Context):
//! - The high-level [solve procedure](crate::procedures::solve) drives the loop.
//! - [Propagation](crate::procedures::propagation) closes the databases under unit clauses and
//!   domain entailment.
//! - [Analysis](crate::procedures::analysis) learns a clause from a conflict.
//! - The [backjump procedure](crate::procedures::backjump) undoes state down to a level.
//!
//! Problems may be read from the extended DIMACS format (see the [builder]) or built
//! programmatically:
//!
//! ```rust
//! # use marten_fd::config::Config;
//! # use marten_fd::context::Context;
//! # use marten_fd::reports::Report;
//! # use marten_fd::structures::atom::Atom;
//! let mut ctx = Context::from_config(Config::default());
//!
//! let v = ctx.add_variable(3);
//!
//! // v may not take 0, and may not take 1, so v = 2 is entailed.
//! ctx.add_clause(vec![Atom::ne(v, 0)]).unwrap();
//! ctx.add_clause(vec![Atom::ne(v, 1)]).unwrap();
//!
//! assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
//! assert_eq!(ctx.variable_db.chosen_value(v), Some(2));
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, narrowed by the targets listed in
//! [misc::log].
//! No log implementation is linked; the bundled CLI initialises
//! [env_logger](https://docs.rs/env_logger/latest/env_logger/) on request.

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod db;

pub mod misc;
pub mod reports;
