/*!
Analysis of a conflict — resolution-based clause learning.

Takes a clause empty under the current valuation and returns a learned asserting clause
together with the level to backjump to.

# Overview

A clause is *asserting* when exactly one of its atoms is falsified at the current level: after
a backjump below that level the clause has a single free atom, and so propagates.
The analysis loop resolves the conflicting clause against the reasons of its latest-falsified
atoms until the resolvent is asserting:

1. If the clause is asserting, append it to the clause database (with its free count at zero,
   so the backjump restores it to unit), extend the occurrence lists, and return it along
   with its backjump level — the second-highest level among its atoms, or zero for a unit
   clause.
2. Otherwise, find the atom of the clause falsified latest: for each atom falsified at the
   current level, the first trail entry from the top which falsifies it; the pivot is the
   atom with the highest such entry.
3. Derive the reason clause for the pivot's falsification from the cell which falsified it,
   resolve, and repeat.

# Reasons

- A cell set by a *clause* gives that clause.
- A cell set by a *decision* has no clause; the reason is synthesised as the tautology
  `(v = k) ∨ (v ≠ k)` on the falsifying decision's own `(variable, value)` pair — the two
  polarities cannot both be false.
- A cell set by *entailment* is justified by the total-domain axiom
  `(v = 0) ∨ (v = 1) ∨ … ∨ (v = d − 1)`.

# Resolution

The resolvent of a clause `C` with pivot atom `a` and reason `R` keeps every atom of `C`
except `a`, and adds every atom of `R` which is not already present and not *incompatible*
with `a` — false whenever `a` holds.
On the pivot's pair this drops the complementary atom, as in Boolean resolution.
Multi-valued semantics admit more: `v = k'` cannot hold alongside a pivot `v = k`, and an `Eq`
pivot's truth falsifies the `Ne` reading of its own pair.
Atoms on *distinct* values with the pivot are not complementary, and resolution proceeds on
the chosen pivot alone.

Excluding incompatible atoms keeps every atom of every resolvent falsified on the current
valuation, which is what makes the asserting test and the learned clause's unit-after-backjump
behaviour sound.

# Termination

Each resolution step strictly reduces the current-level atoms of the clause toward the level's
decision, so analysis terminates; a generous bound on resolution steps is enforced anyway, and
exceeding it reports a solver bug rather than looping.

# Ties

Several atoms may be falsified by one trail entry, since an `Eq` placement forbids the rest of
the variable's domain in a single step.
A tie falls to an atom which is not the direct negation of the entry, when one exists: those
atoms resolve away against the entry's reason, while the negation is exactly the atom the
learned clause will assert.
*/

use crate::{
    context::Context,
    db::{
        variable::Reason,
        ClauseId, LevelIndex,
    },
    misc::log::targets::{self},
    structures::{
        atom::{Atom, Polarity},
        clause::{CClause, Clause},
    },
    types::err::{self, AnalysisError},
};

use crate::db::clause::StoredClause;

/// The result of a successful conflict analysis.
#[derive(Clone, Copy, Debug)]
pub struct AnalysisOk {
    /// The learned clause, stored in the clause database.
    pub key: ClauseId,

    /// The level at which the learned clause asserts.
    pub backjump_level: LevelIndex,
}

/// True exactly when `atom` is false whenever `pivot` holds.
///
/// Complementary atoms are incompatible, and so are a pivot `v = k` with `v = k'` for a
/// distinct `k'`, by domain exclusivity.
fn incompatible(pivot: &Atom, atom: &Atom) -> bool {
    if atom.var != pivot.var {
        return false;
    }
    match pivot.polarity {
        Polarity::Eq => {
            (atom.val == pivot.val && atom.polarity == Polarity::Ne)
                || (atom.val != pivot.val && atom.polarity == Polarity::Eq)
        }
        Polarity::Ne => atom.val == pivot.val && atom.polarity == Polarity::Eq,
    }
}

/// True exactly when the trail entry `placed` falsified the atom.
///
/// An entry falsifies the atom of opposite polarity on its own pair, and an `Eq` entry
/// falsifies `Eq` atoms on every other value of its variable, through domain closure.
fn falsifies(placed: &Atom, atom: &Atom) -> bool {
    placed.var == atom.var
        && ((placed.val == atom.val && placed.polarity != atom.polarity)
            || (placed.polarity == Polarity::Eq
                && atom.polarity == Polarity::Eq
                && placed.val != atom.val))
}

impl Context {
    /// Analyses the given conflicting clause to an asserting clause and a backjump level.
    ///
    /// Must be called with the conflicting clause empty under the current valuation and the
    /// current level above zero.
    pub fn analyze_conflict(&mut self, conflicting: ClauseId) -> Result<AnalysisOk, err::ErrorKind> {
        log::info!(target: targets::ANALYSIS, "Analysis of {conflicting} at level {}", self.level);
        log::trace!(target: targets::ANALYSIS, "State: {}", self.variable_db.state_string());

        let mut clause: CClause = self.clause_db.get(conflicting).atoms().to_vec();

        // Analysis should conclude well before visiting every cell and clause.
        let bound = 2 * self.variable_db.cell_count() + self.clause_db.count();

        for _ in 0..=bound {
            if self.asserting(&clause) {
                let key = self.learn(clause);
                let backjump_level = self.backjump_level_of(key);
                log::info!(target: targets::ANALYSIS, "Learned {key} asserting at level {backjump_level}");
                return Ok(AnalysisOk {
                    key,
                    backjump_level,
                });
            }

            let (pivot_index, falsifier_index) = self.latest_falsified(&clause)?;
            let pivot = clause[pivot_index];
            let reason = self.reason_atoms(&pivot, falsifier_index)?;
            log::trace!(target: targets::ANALYSIS, "Resolving on {pivot}");

            clause = resolve(&clause, &pivot, &reason);
        }

        Err(err::ErrorKind::from(AnalysisError::NoAssertion))
    }

    /// True when exactly one atom of the clause is falsified at the current level.
    fn asserting(&self, atoms: &[Atom]) -> bool {
        let mut falsified_here = 0;
        for atom in atoms {
            if self.variable_db.cell(atom.var, atom.val).level == Some(self.level)
                && self.variable_db.atom_falsified(atom)
            {
                falsified_here += 1;
            }
        }
        falsified_here == 1
    }

    /// The latest-falsified atom of the clause, as a pair of the atom's index in the clause
    /// and the index of the falsifying trail entry.
    ///
    /// Candidates are the atoms falsified at the current level.
    /// For each, the falsifying entry is the first entry from the top of the trail to falsify
    /// it, and the latest candidate is the one with the highest such entry.
    fn latest_falsified(&self, atoms: &[Atom]) -> Result<(usize, usize), AnalysisError> {
        // Per candidate: clause index, trail index, whether the atom negates the entry.
        let mut latest: Option<(usize, usize, bool)> = None;

        for (index, atom) in atoms.iter().enumerate() {
            if self.variable_db.cell(atom.var, atom.val).level != Some(self.level)
                || !self.variable_db.atom_falsified(atom)
            {
                continue;
            }

            let mut falsifier: Option<(usize, bool)> = None;
            for entry_index in (0..self.trail.len()).rev() {
                let entry = self.trail.get(entry_index);
                if falsifies(&entry.atom, atom) {
                    let negation = entry.atom.var == atom.var && entry.atom.val == atom.val;
                    falsifier = Some((entry_index, negation));
                    break;
                }
            }
            let Some((entry_index, negation)) = falsifier else {
                continue;
            };

            let later = match &latest {
                None => true,
                Some((_, latest_index, latest_negation)) => {
                    *latest_index < entry_index
                        || (*latest_index == entry_index && *latest_negation && !negation)
                }
            };
            if later {
                latest = Some((index, entry_index, negation));
            }
        }

        latest
            .map(|(index, entry_index, _)| (index, entry_index))
            .ok_or(AnalysisError::NoFalsifiedAtom)
    }

    /// The atoms of the reason for the pivot's falsification.
    fn reason_atoms(
        &self,
        pivot: &Atom,
        falsifier_index: usize,
    ) -> Result<CClause, err::ErrorKind> {
        match self.variable_db.cell(pivot.var, pivot.val).reason {
            Some(Reason::Clause(reason)) => Ok(self.clause_db.get(reason).atoms().to_vec()),

            Some(Reason::Decision) => {
                let decision = self.trail.get(falsifier_index).atom;
                Ok(vec![decision, decision.negated()])
            }

            Some(Reason::Entailed) => {
                let domain = self.variable_db.variable(pivot.var).domain_size();
                Ok((0..domain).map(|val| Atom::eq(pivot.var, val)).collect())
            }

            None => Err(err::ErrorKind::from(AnalysisError::MissingReason)),
        }
    }

    /// Appends the asserting clause to the clause database and extends the occurrence lists.
    ///
    /// The free count is left at zero — every atom of the clause is falsified — so the coming
    /// backjump restores the clause to unit.
    /// One watch goes to the asserting atom for the same end under the watched scheme: every
    /// other atom sits at or below the backjump level, and stays false across the jump.
    fn learn(&mut self, atoms: CClause) -> ClauseId {
        let asserting = atoms
            .iter()
            .position(|atom| self.variable_db.cell(atom.var, atom.val).level == Some(self.level))
            .expect("! No asserting atom in a learned clause");

        let mut clause = StoredClause::from_atoms(atoms, 0);
        if clause.size() > 1 {
            let other = if asserting == 0 { 1 } else { 0 };
            clause.watched = [Some(asserting), Some(other)];
        }

        let key = self.clause_db.push(clause);
        let size = self.clause_db.get(key).size();
        for slot in 0..size {
            let atom = self.clause_db.get(key).atoms()[slot];
            self.variable_db.register_occurrence(&atom, key);
        }
        key
    }

    /// The backjump level of a learned clause: the second-highest level among its atoms, or
    /// zero for a unit clause.
    fn backjump_level_of(&self, key: ClauseId) -> LevelIndex {
        let clause = self.clause_db.get(key);
        if clause.size() == 1 {
            return 0;
        }
        let mut below = 0;
        for atom in clause.atoms() {
            if let Some(set_at) = self.variable_db.cell(atom.var, atom.val).level {
                if set_at < self.level && below < set_at {
                    below = set_at;
                }
            }
        }
        below
    }
}

/// The resolvent of the clause with the reason, on the given pivot.
fn resolve(clause: &[Atom], pivot: &Atom, reason: &[Atom]) -> CClause {
    let mut resolvent: CClause = clause
        .iter()
        .filter(|atom| *atom != pivot)
        .copied()
        .collect();

    for atom in reason {
        if incompatible(pivot, atom) || resolvent.contains(atom) {
            continue;
        }
        resolvent.push(*atom);
    }

    resolvent
}

#[cfg(test)]
mod resolution_tests {
    use super::*;

    #[test]
    fn pivot_pair_is_dropped() {
        let clause = vec![Atom::eq(0, 1), Atom::eq(1, 0)];
        let reason = vec![Atom::ne(0, 1), Atom::eq(2, 0)];

        let resolvent = resolve(&clause, &Atom::eq(0, 1), &reason);
        assert_eq!(resolvent, vec![Atom::eq(1, 0), Atom::eq(2, 0)]);
    }

    #[test]
    fn exclusive_values_are_dropped() {
        // Against the pivot 0=1, the reason atom 0=2 cannot hold.
        let clause = vec![Atom::eq(0, 1), Atom::ne(1, 0)];
        let reason = vec![Atom::eq(0, 2), Atom::ne(2, 1)];

        let resolvent = resolve(&clause, &Atom::eq(0, 1), &reason);
        assert_eq!(resolvent, vec![Atom::ne(1, 0), Atom::ne(2, 1)]);
    }

    #[test]
    fn ne_pivot_keeps_other_values() {
        // Against the pivot 0≠1, only 0=1 is impossible; 0=2 and 0≠2 both remain.
        let clause = vec![Atom::ne(0, 1), Atom::eq(1, 1)];
        let reason = vec![Atom::eq(0, 1), Atom::eq(0, 2), Atom::ne(0, 0)];

        let resolvent = resolve(&clause, &Atom::ne(0, 1), &reason);
        assert_eq!(
            resolvent,
            vec![Atom::eq(1, 1), Atom::eq(0, 2), Atom::ne(0, 0)]
        );
    }

    #[test]
    fn duplicates_are_not_added() {
        let clause = vec![Atom::eq(0, 0), Atom::eq(1, 1)];
        let reason = vec![Atom::ne(0, 0), Atom::eq(1, 1)];

        let resolvent = resolve(&clause, &Atom::eq(0, 0), &reason);
        assert_eq!(resolvent, vec![Atom::eq(1, 1)]);
    }
}
