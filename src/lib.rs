//! Deep traversal of dynamic, possibly cyclic value graphs.
//!
//! [`traverse`] walks arrays, maps, sets and records depth-first and hands every
//! terminal value (boolean, number, bigint, string, symbol, function) to a callback
//! together with its [`ValueType`]. Containers shared between several positions, or
//! reachable from themselves, are walked once per call.
//!
//! ```
//! use deep_traverse::{TraverseOptions, Value, ValueType, traverse_with};
//!
//! let value = Value::record([("a", Value::from(1)), ("b", Value::from("2"))]);
//! let options = TraverseOptions::new()
//!     .value_types(ValueType::Number)
//!     .include_keys(true);
//!
//! let mut seen = Vec::new();
//! traverse_with(&value, |value, tag| seen.push((value.clone(), tag)), &options);
//! assert_eq!(seen, vec![(Value::from(1), ValueType::Number)]);
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod interfaces;

pub use application::options::{TraverseOptions, ValueTypeFilter};
pub use application::traversal::{collect_terminals, traverse, traverse_with, try_traverse};
pub use domain::container::{
    Array, ContainerId, ContainerRef, Map, MapEntries, Record, Set, SetValues,
};
pub use domain::value::{Function, Node, Symbol, Value};
pub use domain::value_type::ValueType;
pub use error::{Result, TraverseError};
