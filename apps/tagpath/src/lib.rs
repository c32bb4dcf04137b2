//! # tagpath
//!
//! Library half of the `tagpath` binary, exposed so the CLI can be tested
//! without spawning a process.

pub mod cli;
