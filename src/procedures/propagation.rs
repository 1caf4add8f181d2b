/*!
Propagation — closing the databases under assignments, unit clauses, and domain entailment.

# Overview

Two orthogonal rules force atoms:

1. **Unit clause**: an unsatisfied clause with exactly one atom on a free `(variable, value)`
   pair forces that atom.
2. **Entailment**: a variable with every value but one forbidden is forced to take the
   remaining value.

Both reduce to [assign](Context::assign), which places an atom and then closes the variable
under the two rules.

# Placing an atom

Placing `v = k` satisfies every clause containing `v = k` and removes `v ≠ k` from the
unsatisfied clauses containing it.
Then *domain closure*: every other free value `k'` of `v` is treated as though `v ≠ k'` had
been propagated — clauses containing `v ≠ k'` are satisfied, and `v = k'` is removed from
unsatisfied clauses.
All the statuses set this way share the level and reason of the placement.

Placing `v ≠ k` is the same without the closure: a `Ne` atom restricts the domain, but commits
to nothing.

Satisfying a clause decrements the free-occurrence counters of every free atom in the clause;
removing a falsified atom decrements the clause's free count and the atom's own counter.
A clause whose free count drops to one joins the [unit queue](crate::db::unit_q); a clause
whose free count drops to zero is a conflict, noted on the context and left for the
[solve driver](crate::procedures::solve) to resolve.
On conflict any remaining closure is abandoned — the state will be unwound by a backjump.

# Reasons

The reason for a placement is threaded through the propagation API as a parameter: [Decision]
for a free decision, [Clause] with the propagating clause for the unit rule, [Entailed] for
the entailment rule — and domain closure stamps the forbidden mates with the placement's own
reason.
[Analysis](crate::procedures::analysis) reads these back when resolving a conflict.

# Entailment

Entailment checks run through an explicit work queue after each placement, rather than by
recursion: a forced `v = k` is itself placed with reason [Entailed], and the variable is
re-queued until nothing further is forced.

[Decision]: Reason::Decision
[Clause]: Reason::Clause
[Entailed]: Reason::Entailed
*/

use std::collections::VecDeque;

use crate::{
    context::Context,
    db::variable::{Reason, ValueStatus},
    misc::log::targets::{self},
    structures::{
        atom::{Atom, Polarity, Val, Var},
        clause::Clause,
    },
};

impl Context {
    /// Assigns the given atom for the given reason, then closes under entailment.
    ///
    /// Assigning an atom which already holds is a no-op.
    /// On conflict the context's conflict flag is set and propagation stops.
    pub fn assign(&mut self, atom: Atom, reason: Reason) {
        if !self.variable_db.atom_free(&atom) {
            debug_assert!(
                self.variable_db.atom_satisfied(&atom),
                "! Assignment contradicts the valuation: {atom}"
            );
            return;
        }

        log::trace!(target: targets::PROPAGATION, "Assign {atom} at level {} ({reason:?})", self.level);
        self.place_atom(atom, reason);

        let mut pending: VecDeque<Var> = VecDeque::from([atom.var]);
        while let Some(var) = pending.pop_front() {
            if self.conflict.is_some() {
                break;
            }
            if let Some(forced) = self.entailed_value(var) {
                self.counters.entailments += 1;
                log::trace!(target: targets::ENTAILMENT, "Entailed {}", Atom::eq(var, forced));
                self.place_atom(Atom::eq(var, forced), Reason::Entailed);
                pending.push_back(var);
            }
        }
    }

    /// The value the variable is entailed to take, if every other value is forbidden.
    pub fn entailed_value(&self, var: Var) -> Option<Val> {
        let variable = self.variable_db.variable(var);
        if variable.assigned() {
            return None;
        }
        let mut free = variable.free_values();
        match (free.next(), free.next()) {
            (Some(val), None) => Some(val),
            _ => None,
        }
    }

    /// Places a single atom: satisfies and reduces clauses, sets the status, extends the
    /// trail, and, for an `Eq` atom, forbids the rest of the variable's domain.
    fn place_atom(&mut self, atom: Atom, reason: Reason) {
        let Atom { var, val, .. } = atom;

        self.satisfy_clauses(&atom);
        self.remove_occurrences(&atom.negated());

        let level = self.level;
        let cell = self.variable_db.cell_mut(var, val);
        cell.level = Some(level);
        cell.reason = Some(reason);

        match atom.polarity {
            Polarity::Eq => {
                cell.status = ValueStatus::Assigned;
                self.variable_db.variable_mut(var).chosen = Some(val);
                self.trail.push(atom, level);

                // Domain closure: every other free value of var is now forbidden.
                let domain = self.variable_db.variable(var).domain_size();
                for other in 0..domain {
                    if other == val || self.conflict.is_some() {
                        continue;
                    }
                    if self.variable_db.cell(var, other).status != ValueStatus::Free {
                        continue;
                    }
                    self.satisfy_clauses(&Atom::ne(var, other));
                    self.remove_occurrences(&Atom::eq(var, other));

                    let cell = self.variable_db.cell_mut(var, other);
                    cell.status = ValueStatus::Forbidden;
                    cell.level = Some(level);
                    cell.reason = Some(reason);
                }
            }

            Polarity::Ne => {
                cell.status = ValueStatus::Forbidden;
                self.trail.push(atom, level);
            }
        }
    }

    /// Marks every unsatisfied clause containing the atom as satisfied at the current level,
    /// withdrawing the free atoms of each such clause from the heuristic counters.
    fn satisfy_clauses(&mut self, atom: &Atom) {
        let occurrences = self.variable_db.occurrences(atom).len();
        for i in 0..occurrences {
            let cid = self.variable_db.occurrences(atom)[i];
            if self.clause_db.get(cid).satisfied {
                continue;
            }

            let clause = self.clause_db.get_mut(cid);
            clause.satisfied = true;
            clause.sat_level = Some(self.level);

            let size = self.clause_db.get(cid).size();
            for slot in 0..size {
                let member = self.clause_db.get(cid).atoms()[slot];
                if self.variable_db.atom_free(&member) {
                    self.clause_db.get_mut(cid).num_unassigned -= 1;
                    self.variable_db.shift_count(&member, -1);
                }
            }
        }
    }

    /// Removes a freshly falsified atom from the unsatisfied clauses containing it.
    ///
    /// A clause left with one free atom joins the unit queue; a clause left with none is a
    /// conflict.
    fn remove_occurrences(&mut self, atom: &Atom) {
        let occurrences = self.variable_db.occurrences(atom).len();
        for i in 0..occurrences {
            let cid = self.variable_db.occurrences(atom)[i];
            if self.clause_db.get(cid).satisfied {
                continue;
            }

            let clause = self.clause_db.get_mut(cid);
            clause.num_unassigned -= 1;
            let remaining = clause.num_unassigned;
            self.variable_db.shift_count(atom, -1);

            if self.config.watched_literals.value {
                self.rewatch_falsified(cid, atom);
            }

            match remaining {
                1 => {
                    log::trace!(target: targets::QUEUE, "Clause {cid} became unit.");
                    self.unit_q.push_front(cid);
                }
                0 => {
                    log::trace!(target: targets::PROPAGATION, "Clause {cid} conflicts.");
                    if self.conflict.is_none() {
                        self.conflict = Some(cid);
                    }
                }
                _ => {}
            }
        }
    }

    /// Refreshes the unit queue by a scan of the clause database, noting any conflict.
    ///
    /// Detection is through the watched atoms when the watched scheme is configured, and
    /// through the free-atom counts otherwise. The two are observably equivalent.
    pub fn refresh_unit_queue(&mut self) {
        use crate::procedures::watched::WatchStatus;

        self.unit_q.clear();

        if self.config.watched_literals.value {
            for cid in self.clause_db.ids() {
                match self.watch_status(cid) {
                    WatchStatus::Unit(_) => self.unit_q.push_back(cid),
                    WatchStatus::Conflict => {
                        if self.conflict.is_none() {
                            self.conflict = Some(cid);
                        }
                    }
                    WatchStatus::Satisfied | WatchStatus::Unresolved => {}
                }
            }
        } else {
            for cid in self.clause_db.ids() {
                let clause = self.clause_db.get(cid);
                if clause.satisfied {
                    continue;
                }
                match clause.num_unassigned {
                    1 => self.unit_q.push_back(cid),
                    0 => {
                        if self.conflict.is_none() {
                            self.conflict = Some(cid);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    /// Pops queued clauses and propagates the single free atom of each, while unit.
    ///
    /// A queued id is re-checked before anything is forced: the clause may have been
    /// satisfied in the meantime, emptied into a conflict, or — under the watched scheme —
    /// queued on a stale watch while more than one atom is free.
    /// Stops at the first conflict, clearing the queue.
    pub fn propagate_units(&mut self) {
        while self.conflict.is_none() {
            let Some(cid) = self.unit_q.pop_front() else {
                break;
            };
            let clause = self.clause_db.get(cid);
            if clause.satisfied {
                continue;
            }

            match clause.num_unassigned {
                // Queued as unit, now nothing is free: the clause is in conflict.
                0 => {
                    if self.conflict.is_none() {
                        self.conflict = Some(cid);
                    }
                }

                1 => {
                    let unit = clause
                        .atoms()
                        .iter()
                        .find(|atom| self.variable_db.atom_free(atom))
                        .copied()
                        .expect("! An empty clause with a positive free count");

                    self.counters.units += 1;
                    log::trace!(target: targets::PROPAGATION, "Unit consequence of {cid}: {unit}");
                    self.assign(unit, Reason::Clause(cid));
                }

                _ => {}
            }
        }

        if self.conflict.is_some() {
            self.unit_q.clear();
        }
    }
}
