//! Deterministic, pure logic shared by the sync extension.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! strings and return deterministic outputs suitable for tests.

pub mod scan;
pub mod template;
