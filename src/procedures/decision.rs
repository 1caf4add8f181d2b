/*!
The branching heuristic.

# Overview

The chosen atom is the free `(variable, value)` pair maximising
`pos_count − neg_count` — the margin by which committing `v = k` helps more unsatisfied
clauses than it hurts — taken with polarity `Eq`.
Ties fall to the lowest variable, then the lowest value, so decisions are deterministic.

No atom is returned exactly when every variable is assigned, in which case the valuation is
complete.

```rust,ignore
match self.choose_atom() {
    Some(decision) => {
        self.level += 1;
        self.assign(decision, Reason::Decision);
    }
    None => break, // a complete valuation
}
```
*/

use crate::{
    context::Context,
    db::variable::ValueStatus,
    misc::log::targets::{self},
    structures::atom::{Atom, Val, Var},
};

impl Context {
    /// The next atom to branch on, or none if every variable is assigned.
    pub fn choose_atom(&self) -> Option<Atom> {
        let mut best: Option<(Atom, isize)> = None;

        for (var, variable) in self.variable_db.variables().iter().enumerate() {
            if variable.assigned() {
                continue;
            }
            for (val, cell) in variable.cells.iter().enumerate() {
                if cell.status != ValueStatus::Free {
                    continue;
                }
                let score = cell.pos_count as isize - cell.neg_count as isize;
                let better = match &best {
                    None => true,
                    Some((_, max)) => *max < score,
                };
                if better {
                    best = Some((Atom::eq(var as Var, val as Val), score));
                }
            }
        }

        if let Some((atom, score)) = &best {
            log::trace!(target: targets::DECISION, "Chose {atom} with margin {score}");
        }
        best.map(|(atom, _)| atom)
    }
}
