//! esq: search query tooling
//!
//! Offline tooling around the `esq-query` / `esq-wire` crates: compile a
//! query-state snapshot into the engine's wire query, map a captured engine
//! response back into the abstract result model, and print the endpoint
//! URLs for a dataset. Everything works on files and stdout; the transport
//! is left to whatever the caller uses to talk to the engine.

#![warn(missing_docs)]
