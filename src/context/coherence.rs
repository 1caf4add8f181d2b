//! Structural checks over the databases of a context.
//!
//! [assert_coherent](Context::assert_coherent) asserts the invariants every propagation and
//! backjump must preserve.
//! The solve loop runs the check in debug builds only; tests call it directly.

use crate::{
    context::Context,
    db::variable::ValueStatus,
    structures::{atom::{Atom, Polarity}, clause::Clause},
};

impl Context {
    /// Panics unless the databases are mutually coherent.
    ///
    /// Checked, per spec of the solver's state:
    /// - Per variable: at most one assigned value; an assigned value forbids all others; the
    ///   chosen value matches the assigned cell.
    /// - Per cell: a non-free status has a level no higher than the current level.
    /// - Per unsatisfied clause: the free count equals the count of free atoms.
    /// - Per clause: the satisfied flag agrees with the statuses of its atoms.
    /// - Per trail entry: the recorded atom holds, at the recorded level.
    /// - Per cell: the heuristic counters equal the free occurrences of each atom over the
    ///   unsatisfied clauses.
    pub fn assert_coherent(&self) {
        for (var, variable) in self.variable_db.variables().iter().enumerate() {
            let assigned: Vec<usize> = variable
                .cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.status == ValueStatus::Assigned)
                .map(|(val, _)| val)
                .collect();
            assert!(
                assigned.len() <= 1,
                "! Multiple values assigned to variable {var}"
            );

            match assigned.first() {
                Some(&val) => {
                    assert_eq!(
                        variable.chosen,
                        Some(val as u32),
                        "! Chosen value disagrees with the assigned cell of variable {var}"
                    );
                    for (other, cell) in variable.cells.iter().enumerate() {
                        if other != val {
                            assert_eq!(
                                cell.status,
                                ValueStatus::Forbidden,
                                "! Value {other} of assigned variable {var} is not forbidden"
                            );
                        }
                    }
                }
                None => assert_eq!(
                    variable.chosen, None,
                    "! Chosen value without an assigned cell on variable {var}"
                ),
            }

            for (val, cell) in variable.cells.iter().enumerate() {
                match cell.status {
                    ValueStatus::Free => {
                        assert!(cell.level.is_none(), "! Free cell {var}/{val} with a level")
                    }
                    _ => {
                        let level = cell
                            .level
                            .unwrap_or_else(|| panic!("! Set cell {var}/{val} without a level"));
                        assert!(
                            level <= self.level,
                            "! Cell {var}/{val} set above the current level"
                        );
                    }
                }
            }
        }

        for cid in self.clause_db.ids() {
            let clause = self.clause_db.get(cid);

            let free = clause
                .atoms()
                .iter()
                .filter(|atom| self.variable_db.atom_free(atom))
                .count();
            if !clause.satisfied {
                assert_eq!(
                    clause.num_unassigned, free,
                    "! Free count of unsatisfied clause {cid} is stale"
                );
            }

            let witnessed = clause
                .atoms()
                .iter()
                .any(|atom| self.variable_db.atom_satisfied(atom));
            assert_eq!(
                clause.satisfied, witnessed,
                "! Satisfaction flag of clause {cid} disagrees with the valuation"
            );
        }

        for entry in self.trail.entries() {
            assert!(
                self.variable_db.atom_satisfied(&entry.atom),
                "! Trail entry {} does not hold",
                entry.atom
            );
            assert_eq!(
                self.variable_db.cell(entry.atom.var, entry.atom.val).level,
                Some(entry.level),
                "! Trail entry {} at the wrong level",
                entry.atom
            );
        }

        for (var, variable) in self.variable_db.variables().iter().enumerate() {
            for (val, cell) in variable.cells.iter().enumerate() {
                for (polarity, recorded) in [
                    (Polarity::Eq, cell.pos_count),
                    (Polarity::Ne, cell.neg_count),
                ] {
                    let atom = Atom {
                        var: var as u32,
                        val: val as u32,
                        polarity,
                    };
                    let counted = self
                        .variable_db
                        .occurrences(&atom)
                        .iter()
                        .filter(|cid| {
                            !self.clause_db.get(**cid).satisfied
                                && self.variable_db.atom_free(&atom)
                        })
                        .count();
                    assert_eq!(
                        recorded, counted,
                        "! Heuristic counter for {atom} is stale"
                    );
                }
            }
        }
    }
}
