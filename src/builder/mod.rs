/*!
Building a problem in a context.

Problems are built from two operations, used directly or through the
[DIMACS-like reader](crate::builder::dimacs):

- [add_variable](crate::context::Context::add_variable) declares a variable with a finite
  domain `{0, …, d − 1}`.
- [add_clause](crate::context::Context::add_clause) adds a disjunction of atoms over declared
  variables.

Clauses may only be added before a solve begins.
Adding a clause interns its atoms in the occurrence lists and heuristic counters, and fixes
the initial watched slots.

```rust
# use marten_fd::config::Config;
# use marten_fd::context::Context;
# use marten_fd::structures::atom::Atom;
let mut ctx = Context::from_config(Config::default());

let v = ctx.add_variable(4);
let clause = ctx.add_clause(vec![Atom::eq(v, 0), Atom::ne(v, 3)]);

assert!(clause.is_ok());
```
*/

pub mod dimacs;

use crate::{
    context::{Context, ContextState},
    db::{clause::StoredClause, ClauseId},
    misc::log::targets::{self},
    structures::{
        atom::{Val, Var},
        clause::{CClause, Clause},
    },
    types::err::{self, BuildError},
};

impl Context {
    /// Adds a variable with the given domain size, returning the variable.
    pub fn add_variable(&mut self, domain_size: Val) -> Var {
        if self.state == ContextState::Configuration {
            self.state = ContextState::Input;
        }
        self.variable_db.add_variable(domain_size)
    }

    /// Adds a clause over the given atoms, returning its id.
    ///
    /// Atoms must reference declared variables and in-domain values; exact duplicate atoms
    /// are dropped.
    /// An empty clause is accepted, and makes the problem trivially unsatisfiable.
    pub fn add_clause(&mut self, atoms: CClause) -> Result<ClauseId, err::ErrorKind> {
        match self.state {
            ContextState::Configuration | ContextState::Input => {}
            _ => return Err(err::ErrorKind::from(BuildError::SolveInProgress)),
        }

        for atom in &atoms {
            if atom.var as usize >= self.variable_db.count()
                || self.variable_db.variable(atom.var).domain_size() == 0
            {
                return Err(err::ErrorKind::from(BuildError::UndeclaredVariable(atom.var)));
            }
            if atom.val >= self.variable_db.variable(atom.var).domain_size() {
                return Err(err::ErrorKind::from(BuildError::ValueOutOfDomain(atom.var)));
            }
        }

        let mut deduped: CClause = Vec::with_capacity(atoms.len());
        for atom in atoms {
            if !deduped.contains(&atom) {
                deduped.push(atom);
            }
        }

        // Clauses are added before any search, so every atom is free.
        let num_unassigned = deduped.len();
        let key = self.clause_db.push(StoredClause::from_atoms(deduped, num_unassigned));

        let size = self.clause_db.get(key).size();
        for slot in 0..size {
            let atom = self.clause_db.get(key).atoms()[slot];
            self.variable_db.register_occurrence(&atom, key);
            self.variable_db.shift_count(&atom, 1);
        }

        log::trace!(target: targets::PARSE, "Clause {key}: {}", self.clause_db.get(key).as_line());

        self.state = ContextState::Input;
        Ok(key)
    }
}
