/*!
(The internal representation of) an atom.

An atom pairs a variable and one of the values of its domain with a [Polarity]:
- `Eq` asserts the variable takes the value, written `v = k`.
- `Ne` asserts the variable does not take the value, written `v ≠ k`.

Atoms are immutable value objects.
Everything which varies during a solve — whether the atom holds, at which level, and why — lives
in the [variable database](crate::db::variable), keyed by the `(variable, value)` pair.

Variables are `u32`s used as indices into the variable database, so the variables of a problem
are `[0..n)` for some `n`.
Externally variables are 1-indexed, and [Display](std::fmt::Display) renders them so.

```rust
# use marten_fd::structures::atom::{Atom, Polarity};
let atom = Atom::eq(0, 2);

assert_eq!(atom.polarity, Polarity::Eq);
assert_eq!(atom.negated(), Atom::ne(0, 2));
assert_eq!(format!("{atom}"), "1=2");
```
*/

/// A variable, an index into the variable database.
pub type Var = u32;

/// A domain value.
pub type Val = u32;

/// Whether an atom asserts its variable takes its value, or does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Polarity {
    /// The variable takes the value.
    Eq,

    /// The variable does not take the value.
    Ne,
}

impl Polarity {
    /// The opposite polarity.
    pub fn negated(self) -> Self {
        match self {
            Self::Eq => Self::Ne,
            Self::Ne => Self::Eq,
        }
    }
}

/// An atom: a variable, a value from its domain, and a polarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom {
    /// The variable of the atom.
    pub var: Var,

    /// The value of the atom.
    pub val: Val,

    /// The polarity of the atom.
    pub polarity: Polarity,
}

impl Atom {
    /// The atom `var = val`.
    pub fn eq(var: Var, val: Val) -> Self {
        Atom {
            var,
            val,
            polarity: Polarity::Eq,
        }
    }

    /// The atom `var ≠ val`.
    pub fn ne(var: Var, val: Val) -> Self {
        Atom {
            var,
            val,
            polarity: Polarity::Ne,
        }
    }

    /// The negation of the atom, on the same `(variable, value)` pair.
    pub fn negated(self) -> Self {
        Atom {
            var: self.var,
            val: self.val,
            polarity: self.polarity.negated(),
        }
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.polarity {
            Polarity::Eq => write!(f, "{}={}", self.var + 1, self.val),
            Polarity::Ne => write!(f, "{}!={}", self.var + 1, self.val),
        }
    }
}
