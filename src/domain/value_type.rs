use crate::error::TraverseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The primitive kind of a terminal value.
///
/// These are the only tags the traversal ever reports. Containers have no tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    BigInt,
    Boolean,
    Function,
    Number,
    String,
    Symbol,
}

impl ValueType {
    pub const ALL: [ValueType; 6] = [
        ValueType::BigInt,
        ValueType::Boolean,
        ValueType::Function,
        ValueType::Number,
        ValueType::String,
        ValueType::Symbol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::BigInt => "bigint",
            ValueType::Boolean => "boolean",
            ValueType::Function => "function",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Symbol => "symbol",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = TraverseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueType::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| TraverseError::UnknownValueType(s.to_string()))
    }
}
