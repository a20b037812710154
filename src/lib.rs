//! `randpick`: weighted random selection for classroom "random call".
//!
//! The core is a small sampling structure; everything else is a thin layer
//! for rosters, config files and the command line.
//!
//! Exposed modules:
//! - `selector`: `WeightedSelector`, O(log n) weighted draws plus draws of k
//!   distinct items without replacement.
//! - `range`: `RangeSelector`, a selector pre-populated with `min..=max`.
//! - `error`: the selection error taxonomy.
//! - `roster`: students `1..=N` with optional names and weight-override files.
//! - `config`: TOML configuration describing the available classes.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod range;
pub mod roster;
pub mod selector;

pub use config::{ClassConfig, Config, ConfigError};
pub use error::{ErrorKind, SelectionError};
pub use range::{RangeSelector, DEFAULT_WEIGHT};
pub use roster::{format_ids, parse_names, parse_weights, Roster, RosterError};
pub use selector::{SelectMultiple, WeightedSelector};
