/*!
Recovery from a conflict — undoing state down to a target level.

# Overview

A backjump from the current level to some lower target level `L` restores every piece of
state set above `L`:

1. Every `(variable, value)` cell whose status was set at a level above `L` becomes free
   again, forgetting its level and reason. A variable whose assigned cell is freed loses its
   chosen value.
2. The atoms those cells had falsified re-enter the bookkeeping of the clauses which remain
   unsatisfied: each such clause regains a free atom, and the matching heuristic counter is
   re-incremented.
3. Every clause satisfied at a level above `L` becomes unsatisfied, and its free-atom count
   and the counters of its free atoms are rebuilt by re-scanning its atoms.
4. The trail is truncated to the entries at levels up to `L`, and the unit queue is cleared
   (the driver rebuilds it by a scan).

Statuses are restored before any clause counters: a clause increments its counts only for
atoms whose pairs are free *after* the jump, so the freeing pass must come first.

A restart is a backjump to level zero — learned clauses and counters are untouched.
*/

use crate::{
    context::Context,
    db::{variable::ValueStatus, LevelIndex},
    misc::log::targets::{self},
    structures::{
        atom::{Atom, Polarity, Var},
        clause::Clause,
    },
};

impl Context {
    /// Backjumps to the given target level.
    ///
    /// Passing a target at or above the current level undoes nothing.
    pub fn backjump(&mut self, target: LevelIndex) {
        log::trace!(target: targets::BACKJUMP, "Backjump to level {target} from {}", self.level);

        // Free the cells set above the target, noting the form each had falsified.
        let mut freed: Vec<Atom> = Vec::default();
        for var in 0..self.variable_db.count() as Var {
            let domain = self.variable_db.variable(var).domain_size();
            for val in 0..domain {
                let cell = self.variable_db.cell(var, val);
                if !cell.level.is_some_and(|set_at| set_at > target) {
                    continue;
                }
                let form = match cell.status {
                    ValueStatus::Forbidden => Atom::eq(var, val),
                    ValueStatus::Assigned => Atom::ne(var, val),
                    ValueStatus::Free => unreachable!("! A free cell with a level"),
                };
                freed.push(form);

                let cell = self.variable_db.cell_mut(var, val);
                cell.status = ValueStatus::Free;
                cell.level = None;
                cell.reason = None;

                if form.polarity == Polarity::Ne {
                    self.variable_db.variable_mut(var).chosen = None;
                }
            }
        }

        // Freed forms re-enter the clauses which remain unsatisfied.
        for form in &freed {
            let occurrences = self.variable_db.occurrences(form).len();
            for i in 0..occurrences {
                let cid = self.variable_db.occurrences(form)[i];
                if self.clause_db.get(cid).satisfied {
                    continue;
                }
                self.clause_db.get_mut(cid).num_unassigned += 1;
                self.variable_db.shift_count(form, 1);
            }
        }

        // Unsatisfy the clauses satisfied above the target, rebuilding their counts.
        for cid in self.clause_db.ids() {
            let clause = self.clause_db.get(cid);
            if !clause.sat_level.is_some_and(|sat_at| sat_at > target) {
                continue;
            }

            {
                let clause = self.clause_db.get_mut(cid);
                clause.satisfied = false;
                clause.sat_level = None;
                clause.num_unassigned = 0;
            }

            let size = self.clause_db.get(cid).size();
            for slot in 0..size {
                let member = self.clause_db.get(cid).atoms()[slot];
                if self.variable_db.atom_free(&member) {
                    self.clause_db.get_mut(cid).num_unassigned += 1;
                    self.variable_db.shift_count(&member, 1);
                }
            }
        }

        self.trail.truncate_above(target);
        self.unit_q.clear();
    }
}
