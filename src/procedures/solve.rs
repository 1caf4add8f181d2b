/*!
Determines the satisfiability of the problem in a context.

# Overview

The solve loop is a state machine over the context.
Each iteration, in order:

1. If every clause is satisfied, the problem is satisfiable.
2. If the time budget is exhausted, the solve times out.
   The budget is polled here, at the loop head, against a monotonic clock — there is no finer
   cancellation point.
3. If a conflict is flagged:
   - at level zero the problem is unsatisfiable;
   - otherwise [analysis](crate::procedures::analysis) learns an asserting clause and the
     solver backjumps to the clause's level — or to level zero instead, when the configured
     number of backtracks since the last restart has been reached.
4. Otherwise the unit queue is refreshed by a scan of the clause database and
   [propagation](crate::procedures::propagation) runs the queue.
5. With nothing to propagate, a [decision](crate::procedures::decision) opens a new level —
   or, if every variable is assigned, the problem is satisfiable.

Roughly, the loop is as diagrammed:

```none
          +----------+     every clause satisfied, or no atom to decide on
  +------>| check    |-------------------------------------------> Sat (verified)
  |       +----------+
  |            |  conflict flagged
  |            |------------------> level 0 ------| Unsat
  |            ⌄                                  |
  |       +----------+      +----------+          |
  |       | analyse  |----->| backjump |   (or restart to level 0)
  |       +----------+      +----------+
  |            |
  |            ⌄
  |       +-----------+     +----------+
  +-------| propagate |<----| decide   |
          +-----------+     +----------+
```

Before the result is returned a satisfiable conclusion is checked by the
[verifier](crate::procedures::verify) — a failure there is a solver bug, not a result.

# Example

```rust
# use marten_fd::config::Config;
# use marten_fd::context::Context;
# use marten_fd::reports::Report;
# use marten_fd::structures::atom::Atom;
let mut ctx = Context::from_config(Config::default());

let v = ctx.add_variable(2);

ctx.add_clause(vec![Atom::eq(v, 0)]).unwrap();
ctx.add_clause(vec![Atom::ne(v, 0)]).unwrap();

assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
```
*/

use crate::{
    context::{Context, ContextState},
    db::variable::Reason,
    reports::Report,
    types::err::{self},
};

impl Context {
    /// Determines the satisfiability of the problem in the context.
    ///
    /// Repeated calls return the concluded report without further search.
    pub fn solve(&mut self) -> Result<Report, err::ErrorKind> {
        match self.state {
            ContextState::Satisfiable | ContextState::Unsatisfiable | ContextState::Timeout => {
                return Ok(self.report());
            }
            ContextState::Configuration | ContextState::Input | ContextState::Solving => {
                self.state = ContextState::Solving;
            }
        }

        let timer = std::time::Instant::now();
        let time_limit = self.config.time_limit.value;

        'search: loop {
            self.counters.total_iterations += 1;
            log::trace!("Iteration {}", self.counters.total_iterations);

            #[cfg(debug_assertions)]
            self.assert_coherent();

            if self.clause_db.all_satisfied() {
                self.state = ContextState::Satisfiable;
                break 'search;
            }

            self.counters.time = timer.elapsed();
            if !time_limit.is_zero() && self.counters.time > time_limit {
                self.state = ContextState::Timeout;
                break 'search;
            }

            if let Some(conflicting) = self.conflict {
                if self.level == 0 {
                    self.state = ContextState::Unsatisfiable;
                    break 'search;
                }

                let analysis = self.analyze_conflict(conflicting)?;
                self.conflict = None;
                self.counters.backtracks += 1;
                self.counters.fresh_backtracks += 1;

                let threshold = self.config.restart_threshold.value;
                if threshold != 0 && self.counters.fresh_backtracks >= threshold {
                    self.counters.fresh_backtracks = 0;
                    self.counters.restarts += 1;
                    self.level = 0;
                    self.backjump(0);
                } else {
                    self.level = analysis.backjump_level;
                    self.backjump(analysis.backjump_level);
                }
                continue 'search;
            }

            self.refresh_unit_queue();
            if self.conflict.is_some() {
                continue 'search;
            }
            if !self.unit_q.is_empty() {
                self.propagate_units();
                continue 'search;
            }

            match self.choose_atom() {
                Some(decision) => {
                    self.counters.decisions += 1;
                    self.level += 1;
                    log::info!("Decision {decision} opening level {}", self.level);
                    self.assign(decision, Reason::Decision);
                    continue 'search;
                }

                // Every variable is assigned, so the valuation is complete.
                None => {
                    self.state = ContextState::Satisfiable;
                    break 'search;
                }
            }
        }

        self.counters.time = timer.elapsed();

        if self.state == ContextState::Satisfiable {
            self.verify_model()?;
        }

        Ok(self.report())
    }
}
