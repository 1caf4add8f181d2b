/*!
Verification of a returned model.

Satisfaction is recomputed from the variable assignments alone, ignoring the satisfaction
state maintained during search: each clause must contain an atom which holds under the
assignment.

A variable left unassigned by the search may take any of its remaining free values — every
clause constraining the variable is satisfied regardless, or search would not have concluded —
and the verifier settles each on its lowest free value before checking.

Failure here is a solver bug, and is surfaced as a fatal error rather than a result.
*/

use crate::{
    context::Context,
    misc::log::targets::{self},
    structures::{atom::{Polarity, Val, Var}, clause::Clause},
    types::err::{self, VerifyError},
};

impl Context {
    /// Confirms every clause is satisfied by the assignment of a concluded solve.
    pub fn verify_model(&self) -> Result<(), err::ErrorKind> {
        let mut assignment: Vec<Val> = Vec::with_capacity(self.variable_db.count());

        for var in 0..self.variable_db.count() as Var {
            let variable = self.variable_db.variable(var);
            match variable.chosen {
                Some(val) => assignment.push(val),
                None => match variable.free_values().next() {
                    Some(val) => assignment.push(val),
                    None => {
                        // A declared value-less variable is constrained by no clause.
                        if variable.domain_size() == 0 {
                            assignment.push(0);
                            continue;
                        }
                        return Err(err::ErrorKind::from(VerifyError::ExhaustedVariable(var)));
                    }
                },
            }
        }

        for cid in self.clause_db.ids() {
            let satisfied = self.clause_db.get(cid).atoms().iter().any(|atom| {
                let value = assignment[atom.var as usize];
                match atom.polarity {
                    Polarity::Eq => value == atom.val,
                    Polarity::Ne => value != atom.val,
                }
            });
            if !satisfied {
                log::error!(target: targets::VERIFY, "Clause {cid} unsatisfied by the returned model.");
                return Err(err::ErrorKind::from(VerifyError::UnsatisfiedClause(cid)));
            }
        }

        log::info!(target: targets::VERIFY, "Model verified.");
        Ok(())
    }
}
