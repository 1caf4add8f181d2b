/*!
Reading a problem from the extended DIMACS format.

The format is line-oriented, dispatched on the leading character of each line:

- `c …` — a comment, ignored.
- `p cnf N M` — the header, noting variable and clause counts. Informational only.
- `d V D` — a domain declaration: variable `V` has the domain `{0, …, D − 1}`.
  A declaration must appear before any clause referencing the variable, and no variable may
  be declared twice.
- Anything else — a clause: whitespace-separated atoms terminated by a `0` token.

An atom is written `V=K`, `V!=K`, or `V!K`, and whitespace is permitted around the operator,
so `V ! K` also reads as `V ≠ K`.
Variables are 1-indexed in the format; domain values are 0-indexed.

Malformed input fails fast with a [ParseError] naming the offending line; nothing is solved
on a partially read problem.

```rust
# use marten_fd::config::Config;
# use marten_fd::context::Context;
# use marten_fd::reports::Report;
# use std::io::Write;
let mut ctx = Context::from_config(Config::default());

let mut problem = vec![];
let _ = problem.write(b"
c A pigeonhole, comfortably wide.
p cnf 2 2
d 1 2
d 2 2
1=0 2=0 0
1!=0 2!=0 0
");

assert!(ctx.read_problem(problem.as_slice()).is_ok());
assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
```
*/

use std::io::BufRead;

use crate::{
    context::Context,
    misc::log::targets::{self},
    structures::{
        atom::{Atom, Polarity, Val, Var},
        clause::CClause,
    },
    types::err::{self, BuildError, ParseError},
};

/// Counts gathered while reading a problem.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParserInfo {
    /// The variable count promised by the header, if a header was read.
    pub expected_variables: Option<usize>,

    /// The clause count promised by the header, if a header was read.
    pub expected_clauses: Option<usize>,

    /// The count of variables declared.
    pub added_variables: usize,

    /// The count of clauses added.
    pub added_clauses: usize,
}

impl Context {
    /// Reads a problem in the extended DIMACS format into the context.
    ///
    /// ```rust,ignore
    /// context.read_problem(BufReader::new(&file))?;
    /// ```
    pub fn read_problem(&mut self, mut reader: impl BufRead) -> Result<ParserInfo, err::ErrorKind> {
        let mut info = ParserInfo::default();
        let mut buffer = String::default();
        let mut line = 0;

        loop {
            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => line += 1,
                Err(_) => return Err(err::ErrorKind::from(ParseError::Read(line))),
            }

            let content = buffer.trim();
            if content.is_empty() {
                continue;
            }

            match content.chars().next() {
                Some('c') => continue,

                Some('p') => {
                    let mut details = content.split_whitespace();
                    details.next();
                    let header: (Option<usize>, Option<usize>) = match details.next() {
                        Some("cnf") => {
                            let variables = details.next().and_then(|count| count.parse().ok());
                            let clauses = details.next().and_then(|count| count.parse().ok());
                            (variables, clauses)
                        }
                        _ => (None, None),
                    };
                    match header {
                        (Some(variables), Some(clauses)) => {
                            info.expected_variables = Some(variables);
                            info.expected_clauses = Some(clauses);
                        }
                        _ => {
                            return Err(err::ErrorKind::from(ParseError::ProblemSpecification(
                                line,
                            )))
                        }
                    }
                }

                Some('d') => {
                    let mut details = content.split_whitespace();
                    details.next();
                    let named: Option<usize> = details.next().and_then(|token| token.parse().ok());
                    let domain: Option<Val> = details.next().and_then(|token| token.parse().ok());
                    match (named, domain) {
                        (Some(named), Some(domain)) if named > 0 && domain > 0 => {
                            let var = (named - 1) as Var;
                            if self.variable_db.declare_domain(var, domain).is_err() {
                                return Err(err::ErrorKind::from(ParseError::Line(
                                    line,
                                    BuildError::DuplicateDomain(var),
                                )));
                            }
                            log::trace!(target: targets::PARSE, "Declared variable {named} with domain {domain}");
                        }
                        _ => {
                            return Err(err::ErrorKind::from(ParseError::DomainSpecification(
                                line,
                            )))
                        }
                    }
                }

                Some(directive) if directive.is_ascii_alphabetic() => {
                    return Err(err::ErrorKind::from(ParseError::UnknownDirective(line)));
                }

                _ => self.read_clause_line(content, line)?,
            }
        }

        info.added_variables = self.variable_db.count();
        info.added_clauses = self.clause_db.count();

        log::info!(target: targets::PARSE, "Read {} variables and {} clauses", info.added_variables, info.added_clauses);
        Ok(info)
    }

    /// Reads the atoms of a single clause line and adds the clause.
    fn read_clause_line(&mut self, content: &str, line: usize) -> Result<(), err::ErrorKind> {
        let mut chars = content.chars().peekable();
        let mut atoms: CClause = Vec::default();

        loop {
            skip_spaces(&mut chars);
            let Some(named) = read_integer(&mut chars) else {
                // The line ran out, or opened on something other than a number.
                return match chars.peek() {
                    None => Err(err::ErrorKind::from(ParseError::MissingDelimiter(line))),
                    Some(_) => Err(err::ErrorKind::from(ParseError::AtomSyntax(line))),
                };
            };

            skip_spaces(&mut chars);
            let polarity = match chars.peek() {
                Some('=') => {
                    chars.next();
                    Polarity::Eq
                }
                Some('!') => {
                    chars.next();
                    if chars.peek() == Some(&'=') {
                        chars.next();
                    }
                    Polarity::Ne
                }
                _ => {
                    // No operator, so the number must be the terminating 0.
                    match named {
                        0 => {
                            self.add_clause(atoms).map_err(|e| match e {
                                err::ErrorKind::Build(b) => {
                                    err::ErrorKind::from(ParseError::Line(line, b))
                                }
                                other => other,
                            })?;
                            return Ok(());
                        }
                        _ => return Err(err::ErrorKind::from(ParseError::AtomSyntax(line))),
                    }
                }
            };

            skip_spaces(&mut chars);
            let Some(val) = read_integer(&mut chars) else {
                return Err(err::ErrorKind::from(ParseError::AtomSyntax(line)));
            };
            if named == 0 {
                return Err(err::ErrorKind::from(ParseError::AtomSyntax(line)));
            }

            atoms.push(Atom {
                var: (named - 1) as Var,
                val: val as Val,
                polarity,
            });
        }
    }
}

fn skip_spaces(chars: &mut std::iter::Peekable<std::str::Chars>) {
    while chars.peek().is_some_and(|ch| ch.is_whitespace()) {
        chars.next();
    }
}

fn read_integer(chars: &mut std::iter::Peekable<std::str::Chars>) -> Option<u32> {
    let mut read: Option<u64> = None;
    while let Some(digit) = chars.peek().and_then(|ch| ch.to_digit(10)) {
        let grown = read.unwrap_or(0) * 10 + digit as u64;
        if grown > u32::MAX as u64 {
            return None;
        }
        read = Some(grown);
        chars.next();
    }
    read.map(|number| number as u32)
}

#[cfg(test)]
mod parser_tests {
    use std::io::Write;

    use crate::{config::Config, reports::Report, types::err::ErrorKind};

    use super::*;

    fn context_reading(input: &[u8]) -> (Context, Result<ParserInfo, ErrorKind>) {
        let mut ctx = Context::from_config(Config::default());
        let result = ctx.read_problem(input);
        (ctx, result)
    }

    #[test]
    fn spaced_and_joined_negation_agree() {
        use crate::structures::clause::Clause;

        let mut joined = vec![];
        let _ = joined.write(b"d 1 3\n1!=0 0\n1 != 1 0\n1 ! 2 0\n");

        let (ctx, result) = context_reading(joined.as_slice());
        assert!(result.is_ok());
        assert_eq!(ctx.clause_db.count(), 3);

        for cid in ctx.clause_db.ids() {
            let atoms = ctx.clause_db.get(cid).atoms();
            assert_eq!(atoms.len(), 1);
            assert_eq!(atoms[0].polarity, Polarity::Ne);
        }
    }

    #[test]
    fn header_counts_are_informational() {
        let mut problem = vec![];
        let _ = problem.write(b"p cnf 9 9\nd 1 2\n1=0 0\n");

        let (mut ctx, result) = context_reading(problem.as_slice());
        let info = result.expect("a readable problem");
        assert_eq!(info.expected_variables, Some(9));
        assert_eq!(info.added_clauses, 1);
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
    }

    #[test]
    fn malformed_header() {
        let (_, result) = context_reading(b"p cnf potato\n".as_slice());
        assert_eq!(
            result,
            Err(ErrorKind::Parse(ParseError::ProblemSpecification(1)))
        );
    }

    #[test]
    fn duplicate_domain() {
        let (_, result) = context_reading(b"d 1 2\nd 1 3\n".as_slice());
        assert_eq!(
            result,
            Err(ErrorKind::Parse(ParseError::Line(
                2,
                BuildError::DuplicateDomain(0)
            )))
        );
    }

    #[test]
    fn undeclared_variable() {
        let (_, result) = context_reading(b"d 1 2\n2=0 0\n".as_slice());
        assert_eq!(
            result,
            Err(ErrorKind::Parse(ParseError::Line(
                2,
                BuildError::UndeclaredVariable(1)
            )))
        );
    }

    #[test]
    fn value_out_of_domain() {
        let (_, result) = context_reading(b"d 1 2\n1=2 0\n".as_slice());
        assert_eq!(
            result,
            Err(ErrorKind::Parse(ParseError::Line(
                2,
                BuildError::ValueOutOfDomain(0)
            )))
        );
    }

    #[test]
    fn unknown_directive() {
        let (_, result) = context_reading(b"x 1 2\n".as_slice());
        assert_eq!(result, Err(ErrorKind::Parse(ParseError::UnknownDirective(1))));
    }

    #[test]
    fn missing_delimiter() {
        let (_, result) = context_reading(b"d 1 2\n1=0\n".as_slice());
        assert_eq!(result, Err(ErrorKind::Parse(ParseError::MissingDelimiter(2))));
    }

    #[test]
    fn comments_and_blanks_are_skipped() {
        let (ctx, result) = context_reading(b"c nothing to see\n\n\nc still nothing\n".as_slice());
        assert!(result.is_ok());
        assert_eq!(ctx.clause_db.count(), 0);
    }
}
