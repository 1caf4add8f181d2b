/*!
The watched-atom scheme — an alternative detector for unit and conflicting clauses.

Gated by [Config::watched_literals](crate::config::Config::watched_literals); the
occurrence-count scheme of [propagation](crate::procedures::propagation) is the reference,
and the two are observably equivalent.

# Overview

Each stored clause carries two watched slots, positions into its atom sequence.
The truth of a watched atom depends only on the status of its `(variable, value)` pair:

- *true* when the polarity agrees with the status,
- *false* when it opposes it,
- *undefined* while the pair is free.

A clause is satisfied when either watched atom is true; unit when one watched atom is
undefined and the other is false or absent; conflicting when every watched atom is false.

When a watched atom is falsified the clause tries to move that watch to any non-false atom.
If no candidate exists the watches are left in place, and the clause reads as unit or
conflicting at the next inspection.
Nothing needs doing on backjump: a freed atom only improves the standing of a watch.
*/

use crate::{
    context::Context,
    db::ClauseId,
    structures::{atom::Atom, clause::Clause},
};

/// The standing of a clause under its watched atoms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchStatus {
    /// A watched atom is true.
    Satisfied,

    /// One watched atom is undefined, the other false or absent; the noted position is the
    /// undefined atom's.
    Unit(usize),

    /// Every watched atom is false.
    Conflict,

    /// Both watched atoms are undefined.
    Unresolved,
}

impl Context {
    /// The truth of an atom for the watched scheme: holds, fails, or undefined while free.
    fn watch_value(&self, atom: &Atom) -> Option<bool> {
        if self.variable_db.atom_free(atom) {
            None
        } else {
            Some(self.variable_db.atom_satisfied(atom))
        }
    }

    /// The standing of the clause, read from its watched slots alone.
    pub fn watch_status(&self, cid: ClauseId) -> WatchStatus {
        let clause = self.clause_db.get(cid);
        match clause.watched {
            [None, _] => WatchStatus::Conflict,

            [Some(only), None] => match self.watch_value(&clause.atoms()[only]) {
                Some(true) => WatchStatus::Satisfied,
                None => WatchStatus::Unit(only),
                Some(false) => WatchStatus::Conflict,
            },

            [Some(first), Some(second)] => {
                let first_value = self.watch_value(&clause.atoms()[first]);
                let second_value = self.watch_value(&clause.atoms()[second]);
                match (first_value, second_value) {
                    (Some(true), _) | (_, Some(true)) => WatchStatus::Satisfied,
                    (None, Some(false)) => WatchStatus::Unit(first),
                    (Some(false), None) => WatchStatus::Unit(second),
                    (None, None) => WatchStatus::Unresolved,
                    (Some(false), Some(false)) => WatchStatus::Conflict,
                }
            }
        }
    }

    /// Moves the watch on a freshly falsified atom to any non-false atom of the clause, if
    /// one exists.
    pub(crate) fn rewatch_falsified(&mut self, cid: ClauseId, falsified: &Atom) {
        let clause = self.clause_db.get(cid);

        let watching = (0..2).find(|&slot| {
            clause.watched[slot].is_some_and(|position| clause.atoms()[position] == *falsified)
        });
        let Some(slot) = watching else {
            return;
        };

        let mut replacement = None;
        for (position, atom) in clause.atoms().iter().enumerate() {
            if clause.watched.contains(&Some(position)) {
                continue;
            }
            if self.watch_value(atom) != Some(false) {
                replacement = Some(position);
                break;
            }
        }

        if let Some(position) = replacement {
            self.clause_db.get_mut(cid).watched[slot] = Some(position);
        }
    }
}
