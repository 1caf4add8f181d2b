/*!
Configuration of a context.

All configuration for a context is contained within the context, fixed when the context is
created from a [Config].
*/

mod config_option;
pub use config_option::ConfigOption;

use std::time::Duration;

/// The primary configuration structure.
#[derive(Clone)]
pub struct Config {
    /// The time budget for a solve, polled at the top of the search loop.
    pub time_limit: ConfigOption<Duration>,

    /// Detect unit clauses and conflicts through two watched atoms per clause, rather than
    /// through the free-atom counts.
    pub watched_literals: ConfigOption<bool>,

    /// Backtracks between restarts. Zero disables restarts.
    pub restart_threshold: ConfigOption<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            time_limit: ConfigOption {
                name: "time_limit",
                min: Duration::from_secs(0),
                max: Duration::MAX,
                value: Duration::from_secs(3600),
            },

            watched_literals: ConfigOption {
                name: "watched_literals",
                min: false,
                max: true,
                value: false,
            },

            restart_threshold: ConfigOption {
                name: "restart_threshold",
                min: 0,
                max: u32::MAX,
                value: 0,
            },
        }
    }
}
