/*!
A queue of unit clauses to be propagated.

A clause is unit when it is unsatisfied and exactly one of its atoms is on a free
`(variable, value)` pair — the clause then forces that atom.

Clauses join the queue two ways:

- [Propagation](crate::procedures::propagation) pushes a clause to the *front* of the queue the
  moment removing a falsified atom drops the clause's free count to one.
- The [solve driver](crate::procedures::solve) refreshes the queue at the top of each
  iteration by scanning the clause database, pushing to the *back*.

A queued id is a hint, not a promise: by the time an id is popped the clause may have been
satisfied, and the [unit loop](crate::procedures::propagation) re-checks before propagating.
The queue is cleared on conflict and on backjump.
*/

use std::collections::VecDeque;

use crate::db::ClauseId;

/// A queue of (probable) unit clauses.
pub type UnitQ = VecDeque<ClauseId>;
