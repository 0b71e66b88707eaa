//! Helpers shared by the tests of the workspace crates.
//!
//! Linking this crate into a test binary also installs a logger (feature
//! `test_log`, on by default) before any test runs. The filter is read from
//! `RUST_LOG` and falls back to [`DEFAULT_FILTER`].

pub mod segments;

#[cfg(feature = "test_log")]
mod logging;

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,ctree=debug";
