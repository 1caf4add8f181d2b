/*!
Error types used in the library.

- Parse and build errors are external — the input was malformed, and the solver reports as much
  before any search begins.
- Analysis and verification errors are internal — each indicates a solver bug, and a caller
  should abort loudly rather than continue.

Conflicts found during search are *not* errors: a conflict is a data flag on the
[context](crate::context::Context), read and cleared by the search loop.
*/

use crate::db::ClauseId;
use crate::structures::atom::Var;

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error while parsing a problem file.
    Parse(ParseError),

    /// An error while building a problem through the context API.
    Build(BuildError),

    /// An error during conflict analysis.
    Analysis(AnalysisError),

    /// An error while verifying a found model.
    Verify(VerifyError),
}

/// Errors while parsing a problem file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The `p cnf` header could not be read.
    ProblemSpecification(usize),

    /// A `d` domain declaration could not be read.
    DomainSpecification(usize),

    /// A line begins with an unrecognised directive character.
    UnknownDirective(usize),

    /// An atom could not be read from a clause line.
    AtomSyntax(usize),

    /// A clause line is not terminated by a `0` token.
    MissingDelimiter(usize),

    /// A problem at a specific line, wrapping a build error.
    Line(usize, BuildError),

    /// The reader failed while reading a line.
    Read(usize),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors while building a problem.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// An atom references a variable with no declared domain.
    UndeclaredVariable(Var),

    /// An atom's value is outside its variable's domain.
    ValueOutOfDomain(Var),

    /// A variable's domain was declared twice.
    DuplicateDomain(Var),

    /// A clause was added after a solve had begun.
    SolveInProgress,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// An error during conflict analysis.
///
/// Any instance indicates a solver bug.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// Resolution failed to produce an asserting clause within the resolution bound.
    NoAssertion,

    /// A falsified atom carried no reason.
    MissingReason,

    /// No atom of the clause is falsified at the current level.
    NoFalsifiedAtom,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

/// An error while verifying a found model.
///
/// Any instance indicates a solver bug.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerifyError {
    /// The clause is unsatisfied by the assignment returned from a solve.
    UnsatisfiedClause(ClauseId),

    /// The variable has neither an assigned nor a free value.
    ExhaustedVariable(Var),
}

impl From<VerifyError> for ErrorKind {
    fn from(e: VerifyError) -> Self {
        ErrorKind::Verify(e)
    }
}
