//! Configuration for bidtree.
//!
//! Compile-time constants live at module level; [`Config`] carries the
//! handful of knobs that can be changed at runtime through environment
//! variables.

use std::env;

use log::warn;

/// Menu choice that ends the interactive session.
pub const EXIT_CHOICE: u32 = 9;

/// Environment variable holding the `env_logger` filter.
pub const LOG_ENV_VAR: &str = "BIDTREE_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variable holding the initial arena capacity.
pub const CAPACITY_ENV_VAR: &str = "BIDTREE_CAPACITY";

/// Environment variable that enables the statistics line on exit.
pub const STATS_ENV_VAR: &str = "BIDTREE_STATS";

/// Number of node slots reserved up front when nothing else is configured.
///
/// The arena grows past this on demand; it only saves the first few
/// reallocations for small interactive sessions.
pub const INITIAL_NODE_CAPACITY: usize = 64;

/// Runtime configuration for the binary.
///
/// The log filter is not part of it: the logger is installed from
/// [`LOG_ENV_VAR`] before the config is read, so that warnings about bad
/// values are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Node slots to pre-allocate in the index arena.
    pub initial_capacity: usize,

    /// Print an index statistics line when the session ends.
    pub print_stats: bool,
}

impl Config {
    /// Build a config from the process environment.
    ///
    /// Unparsable values fall back to their defaults with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(CAPACITY_ENV_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) => config.initial_capacity = capacity,
                Err(_) => warn!(
                    "ignoring {}={:?}: not a non-negative integer",
                    CAPACITY_ENV_VAR, raw
                ),
            }
        }

        if let Some(raw) = lookup(STATS_ENV_VAR) {
            config.print_stats = matches!(raw.trim(), "1" | "true" | "TRUE" | "yes");
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_NODE_CAPACITY,
            print_stats: false,
        }
    }
}
