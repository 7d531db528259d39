//! CLI subcommands.

pub mod analyze;
pub mod batch;
pub mod categories;
pub mod classify;
pub mod config;
