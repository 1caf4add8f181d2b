/*!
The clause database — an append-only store of clauses and their satisfaction state.

Clauses are indexed by [ClauseId], in order of addition.
Original clauses are added while building a problem; learned clauses are appended by
[analysis](crate::procedures::analysis) during a solve.
No clause is ever removed.

Alongside its atoms, a stored clause carries the state the solver maintains incrementally:

- `satisfied`, with the level the clause became satisfied at, so the state can be undone on
  [backjump](crate::procedures::backjump).
- `num_unassigned`, a count of the clause's atoms whose `(variable, value)` pair is currently
  free. An unsatisfied clause with a count of one is a unit clause; with a count of zero, a
  conflict.
- Two watched slots, used only under the
  [watched-literal scheme](crate::procedures::watched).
*/

use crate::{
    db::{ClauseId, LevelIndex},
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
    },
};

/// A clause, together with the satisfaction state maintained during a solve.
#[derive(Clone, Debug)]
pub struct StoredClause {
    /// The atoms of the clause.
    atoms: CClause,

    /// True while some atom of the clause holds on the current valuation.
    pub satisfied: bool,

    /// The level the clause became satisfied at, while satisfied.
    pub sat_level: Option<LevelIndex>,

    /// A count of the clause's atoms whose `(variable, value)` pair is free.
    pub num_unassigned: usize,

    /// Indices of the two watched atoms, while the watched scheme is in use.
    pub watched: [Option<usize>; 2],
}

impl StoredClause {
    /// Stores the given atoms, with the noted count of free atoms.
    pub fn from_atoms(atoms: CClause, num_unassigned: usize) -> Self {
        let watched = match atoms.len() {
            0 => [None, None],
            1 => [Some(0), None],
            _ => [Some(0), Some(1)],
        };
        StoredClause {
            atoms,
            satisfied: false,
            sat_level: None,
            num_unassigned,
            watched,
        }
    }
}

impl Clause for StoredClause {
    fn size(&self) -> usize {
        self.atoms.len()
    }

    fn atoms(&self) -> &[Atom] {
        &self.atoms
    }
}

/// The clause database.
#[derive(Debug, Default)]
pub struct ClauseDB {
    clauses: Vec<StoredClause>,
}

impl ClauseDB {
    /// Appends a clause to the store, returning its id.
    pub fn push(&mut self, clause: StoredClause) -> ClauseId {
        self.clauses.push(clause);
        (self.clauses.len() - 1) as ClauseId
    }

    /// A count of all stored clauses, original and learned.
    pub fn count(&self) -> usize {
        self.clauses.len()
    }

    /// The clause with the given id.
    pub fn get(&self, id: ClauseId) -> &StoredClause {
        &self.clauses[id as usize]
    }

    /// A mutable borrow of the clause with the given id.
    pub fn get_mut(&mut self, id: ClauseId) -> &mut StoredClause {
        &mut self.clauses[id as usize]
    }

    /// The ids of all stored clauses, in order of addition.
    pub fn ids(&self) -> impl Iterator<Item = ClauseId> {
        0..self.clauses.len() as ClauseId
    }

    /// The stored clauses, in order of addition.
    pub fn clauses(&self) -> &[StoredClause] {
        &self.clauses
    }

    /// True if every stored clause is satisfied on the current valuation.
    pub fn all_satisfied(&self) -> bool {
        self.clauses.iter().all(|clause| clause.satisfied)
    }
}
