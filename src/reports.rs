//! Reports from a solve, and the statistics block printed after a result.

use crate::context::Context;

/// The outcome of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// The problem is satisfiable, with a model available.
    Satisfiable,

    /// The problem is unsatisfiable.
    Unsatisfiable,

    /// The time budget was exhausted.
    Timeout,

    /// The solve has not concluded.
    Unknown,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SAT"),
            Self::Unsatisfiable => write!(f, "UNSAT"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A snapshot of the counts reported after a solve.
#[derive(Clone, Copy, Debug)]
pub struct Statistics {
    pub decisions: usize,
    pub backtracks: usize,
    pub entailments: usize,
    pub restarts: usize,
    pub variables: usize,
    pub clauses: usize,
}

impl Context {
    /// The statistics of the (current or concluded) solve.
    pub fn statistics(&self) -> Statistics {
        Statistics {
            decisions: self.counters.decisions,
            backtracks: self.counters.backtracks,
            entailments: self.counters.entailments,
            restarts: self.counters.restarts,
            variables: self.variable_db.count(),
            clauses: self.clause_db.count(),
        }
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Decisions   : {}", self.decisions)?;
        writeln!(f, "Backtracks  : {}", self.backtracks)?;
        writeln!(f, "Entailments : {}", self.entailments)?;
        writeln!(f, "Restarts    : {}", self.restarts)?;
        writeln!(f, "Variables   : {}", self.variables)?;
        write!(f, "Clauses     : {}", self.clauses)
    }
}
