//! I/O helpers for the sync extension.

pub mod config;
pub mod process;
pub mod runner;
