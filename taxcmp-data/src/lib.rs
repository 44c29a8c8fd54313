//! Loading regime parameters from disk.
//!
//! Two formats are supported: a TOML file describing a whole
//! [`RegimeConfig`](taxcmp_core::RegimeConfig), and a CSV bracket schedule
//! (`upper_bound,rate`) that can replace the TOML file's brackets.

pub mod loader;

pub use loader::{BracketRecord, RegimeLoader, RegimeLoaderError, ScheduleLoader};
