//! The context — to which problems are added and within which solves take place.
//!
//! A context owns every database of a solve, the configuration, and the counters.
//! The solver is single-owner and non-reentrant: nothing is shared, nothing is re-entered, and
//! memory grows monotonically until the context is dropped.
//!
//! # Example
//! ```rust
//! # use marten_fd::config::Config;
//! # use marten_fd::context::Context;
//! # use marten_fd::reports::Report;
//! # use marten_fd::structures::atom::Atom;
//! let mut ctx = Context::from_config(Config::default());
//!
//! let v = ctx.add_variable(2);
//! let w = ctx.add_variable(2);
//!
//! ctx.add_clause(vec![Atom::eq(v, 0), Atom::eq(w, 1)]).unwrap();
//! ctx.add_clause(vec![Atom::eq(v, 1), Atom::eq(w, 0)]).unwrap();
//!
//! assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
//! ```

mod coherence;
mod counters;
pub use counters::Counters;

use crate::{
    config::Config,
    db::{clause::ClauseDB, trail::Trail, unit_q::UnitQ, variable::VariableDB, ClauseId, LevelIndex},
    reports::Report,
};

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// The context holds no part of a problem.
    Configuration,

    /// A problem is being, or has been, added to the context.
    Input,

    /// A solve is in progress.
    Solving,

    /// The problem is known to be satisfiable, with a complete valuation.
    Satisfiable,

    /// The problem is known to be unsatisfiable.
    Unsatisfiable,

    /// The time budget was exhausted before the problem was decided.
    Timeout,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Input => write!(f, "Input"),
            Self::Solving => write!(f, "Solving"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Timeout => write!(f, "Timeout"),
        }
    }
}

/// A context: a problem, the state of its solve, and its configuration.
pub struct Context {
    /// The configuration of the context.
    pub config: Config,

    /// Counters related to a context/solve.
    pub counters: Counters,

    /// The variable database.
    /// See [db::variable](crate::db::variable) for details.
    pub variable_db: VariableDB,

    /// The clause database.
    /// See [db::clause](crate::db::clause) for details.
    pub clause_db: ClauseDB,

    /// The trail.
    /// See [db::trail](crate::db::trail) for details.
    pub trail: Trail,

    /// The queue of (probable) unit clauses.
    /// See [db::unit_q](crate::db::unit_q) for details.
    pub unit_q: UnitQ,

    /// The clause found empty under the current valuation, while a conflict is unresolved.
    ///
    /// A data flag, not an exception — the search loop reads and clears it.
    pub conflict: Option<ClauseId>,

    /// The current decision level.
    pub level: LevelIndex,

    /// The status of the context.
    pub state: ContextState,
}

impl Context {
    /// Creates a context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        Context {
            config,

            counters: Counters::default(),

            variable_db: VariableDB::default(),
            clause_db: ClauseDB::default(),
            trail: Trail::default(),
            unit_q: UnitQ::default(),

            conflict: None,
            level: 0,

            state: ContextState::Configuration,
        }
    }

    /// The report matching the state of the context.
    pub fn report(&self) -> Report {
        match self.state {
            ContextState::Satisfiable => Report::Satisfiable,
            ContextState::Unsatisfiable => Report::Unsatisfiable,
            ContextState::Timeout => Report::Timeout,
            _ => Report::Unknown,
        }
    }
}
