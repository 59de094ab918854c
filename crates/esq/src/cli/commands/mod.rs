//! Implementations of the `esq` subcommands.

pub mod compile;
pub mod map;
pub mod url;

mod shared;
