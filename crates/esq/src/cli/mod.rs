//! CLI support for the `esq` binary.

pub mod args;
pub mod commands;
pub mod config;
