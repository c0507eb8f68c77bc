//! Traversal engine and its per-call options.
//!
//! Every top-level call owns a fresh visited-set, so nested or repeated calls never
//! share cycle detection state.

pub mod options;
pub mod traversal;
