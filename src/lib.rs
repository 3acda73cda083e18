//! Test-lifecycle database synchronization via an external management tool.
//!
//! Before a suite runs and after each test ends, the destination database is
//! re-synchronized from a source database by shelling out to a Drush-style
//! command-line tool, optionally followed by a cache invalidation on the
//! destination. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (template substitution,
//!   error-marker scanning). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (configuration files, child
//!   process execution). Isolated to enable fakes in tests.
//!
//! [`orchestrator`] coordinates the two: it validates the configured aliases
//! and cache target up front, then issues the sync pipeline on each lifecycle
//! trigger through [`io::runner::ToolRunner`].

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod orchestrator;
pub mod sink;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
