use crate::domain::value_type::ValueType;
use crate::error::{Result, TraverseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Read;

/// The set of terminal tags allowed to reach the callback.
///
/// A filter is built from a single tag or any collection of tags and is always held
/// as a set. Names that are not one of the six tags are kept, but never match: a
/// filter made only of unknown names accepts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ValueTypesRepr", into = "ValueTypesRepr")]
pub struct ValueTypeFilter {
    accepted: BTreeSet<ValueType>,
    unrecognized: Vec<String>,
}

impl ValueTypeFilter {
    /// Builds a filter from tag names without rejecting unknown ones.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for name in names {
            let name = name.as_ref();
            match name.parse::<ValueType>() {
                Ok(tag) => {
                    filter.accepted.insert(tag);
                }
                Err(_) => filter.unrecognized.push(name.to_string()),
            }
        }
        filter
    }

    pub fn accepts(&self, tag: ValueType) -> bool {
        self.accepted.contains(&tag)
    }

    /// True when the filter holds no entries at all, recognized or not.
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.unrecognized.is_empty()
    }

    pub fn accepted(&self) -> impl Iterator<Item = ValueType> + '_ {
        self.accepted.iter().copied()
    }

    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }
}

impl From<ValueType> for ValueTypeFilter {
    fn from(tag: ValueType) -> Self {
        std::iter::once(tag).collect()
    }
}

impl From<Vec<ValueType>> for ValueTypeFilter {
    fn from(tags: Vec<ValueType>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<&[ValueType]> for ValueTypeFilter {
    fn from(tags: &[ValueType]) -> Self {
        tags.iter().copied().collect()
    }
}

impl<const N: usize> From<[ValueType; N]> for ValueTypeFilter {
    fn from(tags: [ValueType; N]) -> Self {
        tags.into_iter().collect()
    }
}

impl FromIterator<ValueType> for ValueTypeFilter {
    fn from_iter<I: IntoIterator<Item = ValueType>>(iter: I) -> Self {
        Self {
            accepted: iter.into_iter().collect(),
            unrecognized: Vec::new(),
        }
    }
}

/// Wire shape of `valueTypes`: a single name or a list of names.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ValueTypesRepr {
    One(String),
    Many(Vec<String>),
}

impl From<ValueTypesRepr> for ValueTypeFilter {
    fn from(repr: ValueTypesRepr) -> Self {
        match repr {
            ValueTypesRepr::One(name) => Self::from_names([name]),
            ValueTypesRepr::Many(names) => Self::from_names(names),
        }
    }
}

impl From<ValueTypeFilter> for ValueTypesRepr {
    fn from(filter: ValueTypeFilter) -> Self {
        let names = filter
            .accepted
            .iter()
            .map(|tag| tag.as_str().to_string())
            .chain(filter.unrecognized)
            .collect();
        ValueTypesRepr::Many(names)
    }
}

/// Options for a single traversal call.
///
/// Deserializes from `{"valueTypes": "number" | ["number", ...], "includeKeys": bool}`,
/// both fields optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraverseOptions {
    /// Tags passed to the callback. `None` passes every tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_types: Option<ValueTypeFilter>,
    /// Traverse record and map keys before their values.
    pub include_keys: bool,
}

impl TraverseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value_types(mut self, value_types: impl Into<ValueTypeFilter>) -> Self {
        self.value_types = Some(value_types.into());
        self
    }

    pub fn include_keys(mut self, include_keys: bool) -> Self {
        self.include_keys = include_keys;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(TraverseError::InvalidOptions)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(TraverseError::InvalidOptions)
    }

    /// The filter in effect, `None` when every tag passes.
    pub(crate) fn active_filter(&self) -> Option<&ValueTypeFilter> {
        self.value_types.as_ref().filter(|filter| !filter.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = TraverseOptions::default();
        assert!(options.value_types.is_none());
        assert!(!options.include_keys);
        assert!(options.active_filter().is_none());
    }

    #[test]
    fn test_single_tag_normalizes_to_set() {
        let filter = ValueTypeFilter::from(ValueType::Number);
        assert!(filter.accepts(ValueType::Number));
        assert!(!filter.accepts(ValueType::String));
        assert_eq!(filter.accepted().count(), 1);
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let filter = ValueTypeFilter::from([ValueType::String, ValueType::String]);
        assert_eq!(filter.accepted().collect::<Vec<_>>(), vec![ValueType::String]);
    }

    #[test]
    fn test_from_names_keeps_unknown_names() {
        let filter = ValueTypeFilter::from_names(["number", "object"]);
        assert!(filter.accepts(ValueType::Number));
        assert_eq!(filter.unrecognized(), ["object".to_string()]);
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_empty_filter_is_inactive() {
        let options = TraverseOptions::new().value_types(Vec::<ValueType>::new());
        assert!(options.value_types.is_some());
        assert!(options.active_filter().is_none());
    }

    #[test]
    fn test_unknown_only_filter_stays_active() {
        let options = TraverseOptions::new().value_types(ValueTypeFilter::from_names(["date"]));
        let filter = options.active_filter().unwrap();
        assert!(ValueType::ALL.iter().all(|tag| !filter.accepts(*tag)));
    }

    #[test]
    fn test_deserialize_single_name() {
        let options = TraverseOptions::from_json_str(r#"{"valueTypes": "string"}"#).unwrap();
        assert_eq!(options.value_types, Some(ValueType::String.into()));
        assert!(!options.include_keys);
    }

    #[test]
    fn test_deserialize_name_list_and_keys() {
        let options = TraverseOptions::from_json_str(
            r#"{"valueTypes": ["number", "boolean"], "includeKeys": true}"#,
        )
        .unwrap();
        assert_eq!(
            options.value_types,
            Some([ValueType::Number, ValueType::Boolean].into())
        );
        assert!(options.include_keys);
    }

    #[test]
    fn test_deserialize_empty_document() {
        let options = TraverseOptions::from_json_str("{}").unwrap();
        assert_eq!(options, TraverseOptions::default());
    }

    #[test]
    fn test_deserialize_rejects_wrong_shape() {
        let result = TraverseOptions::from_json_str(r#"{"includeKeys": "yes"}"#);
        assert!(matches!(result, Err(TraverseError::InvalidOptions(_))));
    }

    #[test]
    fn test_serialize_round_trip_preserves_unknown_names() {
        let options = TraverseOptions::new()
            .value_types(ValueTypeFilter::from_names(["symbol", "regexp"]))
            .include_keys(true);
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(
            json,
            r#"{"valueTypes":["symbol","regexp"],"includeKeys":true}"#
        );
        assert_eq!(TraverseOptions::from_json_str(&json).unwrap(), options);
    }
}
