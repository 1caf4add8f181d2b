/*!
Log targets for narrowing solver output.

The library logs through the [log] facade and never installs an implementation of its own —
the bundled CLI wires up env_logger behind `--log`, and embedders may install whatever suits
them.

Every call names one of the targets below, one per subsystem, so output can be cut down to
the part of a solve under scrutiny.
For example, with env_logger, `RUST_LOG=propagation=trace` follows each placement and unit
consequence while keeping analysis and backjump records quiet.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    pub const PROPAGATION: &str = "propagation";
    pub const ENTAILMENT: &str = "entailment";
    pub const ANALYSIS: &str = "analysis";
    pub const BACKJUMP: &str = "backjump";
    pub const DECISION: &str = "decision";
    pub const QUEUE: &str = "queue";
    pub const VERIFY: &str = "verify";
    pub const PARSE: &str = "parse";
}
