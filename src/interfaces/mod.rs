//! Adapters that turn external data into traversable values.

pub mod json;
