// crates/vrp-consent-core/src/core/document.rs
// ============================================================================
// Module: VRP Payload Document Tree
// Description: Total, type-safe representation of a parsed consent payload.
// Purpose: Let validators query loosely-typed input without failing on mismatch.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A [`DocumentNode`] is one node of a parsed consent-initiation payload. The
//! tree is built once per request and never mutated afterwards. Every accessor is
//! total: asking for a key on a string, or a string on an array, reports
//! absence instead of failing.
//!
//! ## Invariants
//! - Object keys are unique; duplicate keys in raw JSON keep the last value.
//! - Unparseable input becomes [`DocumentNode::Invalid`] rather than an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Discriminant for a [`DocumentNode`], used in error messages and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON string.
    String,
    /// JSON number.
    Number,
    /// JSON boolean.
    Boolean,
    /// JSON null.
    Null,
    /// Input that was not parseable JSON.
    Invalid,
}

impl NodeKind {
    /// Returns the stable label for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Object => "JSONObject",
            Self::Array => "JSONArray",
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Null => "null",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One node of a parsed consent payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    /// Mapping from unique string keys to child nodes.
    Object(BTreeMap<String, Self>),
    /// Ordered sequence of child nodes.
    Array(Vec<Self>),
    /// String scalar.
    String(String),
    /// Numeric scalar, kept in its JSON representation.
    Number(Number),
    /// Boolean scalar.
    Boolean(bool),
    /// Explicit null.
    Null,
    /// Raw input that could not be parsed as JSON.
    Invalid,
}

// ============================================================================
// SECTION: Construction
// ============================================================================

impl DocumentNode {
    /// Parses raw payload text into a document tree.
    ///
    /// Text that is not valid JSON yields [`DocumentNode::Invalid`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str::<Value>(raw).map_or(Self::Invalid, Self::from)
    }

    /// Parses raw payload bytes into a document tree.
    ///
    /// Bytes that are not valid UTF-8 JSON yield [`DocumentNode::Invalid`].
    #[must_use]
    pub fn parse_bytes(raw: &[u8]) -> Self {
        serde_json::from_slice::<Value>(raw).map_or(Self::Invalid, Self::from)
    }

    /// Converts the node back into a JSON value.
    ///
    /// [`DocumentNode::Invalid`] maps to `null`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Object(map) => {
                Value::Object(map.iter().map(|(key, node)| (key.clone(), node.to_value())).collect())
            }
            Self::Array(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            Self::String(text) => Value::String(text.clone()),
            Self::Number(number) => Value::Number(number.clone()),
            Self::Boolean(flag) => Value::Bool(*flag),
            Self::Null | Self::Invalid => Value::Null,
        }
    }
}

impl From<Value> for DocumentNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(key, child)| (key, Self::from(child))).collect())
            }
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::String(text) => Self::String(text),
            Value::Number(number) => Self::Number(number),
            Value::Bool(flag) => Self::Boolean(flag),
            Value::Null => Self::Null,
        }
    }
}

impl From<&Value> for DocumentNode {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

// ============================================================================
// SECTION: Probes
// ============================================================================

impl DocumentNode {
    /// Returns the kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Object(_) => NodeKind::Object,
            Self::Array(_) => NodeKind::Array,
            Self::String(_) => NodeKind::String,
            Self::Number(_) => NodeKind::Number,
            Self::Boolean(_) => NodeKind::Boolean,
            Self::Null => NodeKind::Null,
            Self::Invalid => NodeKind::Invalid,
        }
    }

    /// Returns true for an explicit JSON null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true when this node is an object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns true when this node is an object with at least one key.
    #[must_use]
    pub fn is_non_empty_object(&self) -> bool {
        self.as_object().is_some_and(|map| !map.is_empty())
    }

    /// Returns the object entries when this node is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements when this node is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns the string value when this node is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns the child stored under `key`, if this node is an object holding it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Returns true when this node is an object containing `key`.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the child under `key` when it is an object.
    #[must_use]
    pub fn object_at(&self, key: &str) -> Option<&Self> {
        self.get(key).filter(|child| child.is_object())
    }

    /// Returns the elements of the child under `key` when it is an array.
    #[must_use]
    pub fn array_at(&self, key: &str) -> Option<&[Self]> {
        self.get(key).and_then(Self::as_array)
    }

    /// Returns the string under `key` when it is a string.
    #[must_use]
    pub fn str_at(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Self::as_str)
    }

    /// Returns the string under `key` when it is a string that is non-empty after trimming.
    #[must_use]
    pub fn non_empty_str_at(&self, key: &str) -> Option<&str> {
        self.str_at(key).filter(|text| !text.trim().is_empty())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use serde_json::json;

    use super::*;

    #[test]
    fn parse_rejects_malformed_text_as_invalid() {
        assert_eq!(DocumentNode::parse("{\"Data\":"), DocumentNode::Invalid);
        assert_eq!(DocumentNode::parse_bytes(&[0xFF, 0xFE]), DocumentNode::Invalid);
    }

    #[test]
    fn accessors_report_absence_on_type_mismatch() {
        let node = DocumentNode::from(json!({"Name": "x", "List": [1], "Empty": "  "}));
        assert!(node.get("Missing").is_none());
        assert!(node.object_at("Name").is_none());
        assert!(node.array_at("Name").is_none());
        assert_eq!(node.array_at("List").map(<[DocumentNode]>::len), Some(1));
        assert!(node.non_empty_str_at("Empty").is_none());
        assert_eq!(node.non_empty_str_at("Name"), Some("x"));

        let scalar = DocumentNode::String("plain".to_string());
        assert!(!scalar.has_key("Data"));
        assert!(!scalar.is_non_empty_object());
    }

    #[test]
    fn to_value_round_trips_parsed_json() {
        let value = json!({"a": [true, null, 1.5], "b": {"c": "d"}});
        let node = DocumentNode::from(&value);
        assert_eq!(node.to_value(), value);
        assert_eq!(node.kind(), NodeKind::Object);
    }
}
