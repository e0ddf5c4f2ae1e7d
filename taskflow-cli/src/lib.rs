//! Library surface of the `TaskFlow` demo CLI.

pub mod config;
