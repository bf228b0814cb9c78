//! Document model for custom resource specs.
//!
//! A spec is a JSON mapping at the top level. Values below it are the
//! tagged union [`serde_json::Value`]:
//! - `Null`, `Bool`, `Number`, `String` (scalars)
//! - `Array` (sequences)
//! - `Object` (nested mappings)

use serde_json::{Map, Value};

/// A decoded spec: string keys mapped to JSON values.
pub type Document = Map<String, Value>;

/// Which side of a merge a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentRole {
    /// The template providing default values
    Default,
    /// The user-supplied spec layered over the template
    Changed,
}

impl std::fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRole::Default => write!(f, "default"),
            DocumentRole::Changed => write!(f, "changed"),
        }
    }
}

/// Decode raw bytes into a [`Document`].
///
/// A top-level JSON `null` decodes to an empty document.
///
/// # Errors
///
/// Returns [`DecodeError::Syntax`] if the bytes are not valid JSON and
/// [`DecodeError::NotAMapping`] if the top level is not a JSON object.
///
/// # Examples
///
/// ```
/// use operand_core::decode;
///
/// let doc = decode(br#"{"size": "small"}"#).unwrap();
/// assert_eq!(doc["size"], "small");
///
/// assert!(decode(b"null").unwrap().is_empty());
/// assert!(decode(b"[1, 2]").is_err());
/// ```
pub fn decode(bytes: &[u8]) -> Result<Document, DecodeError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Document::new()),
        other => Err(DecodeError::NotAMapping {
            found: value_kind(&other),
        }),
    }
}

/// Human-readable name of a value's variant.
#[must_use]
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Errors that can occur while decoding a document.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Input is not valid JSON
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    /// Input is valid JSON but not an object
    #[error("expected a JSON object at the top level, found {found}")]
    NotAMapping {
        /// Variant name of the top-level value
        found: &'static str,
    },
    /// Decoding failed for one side of a merge
    #[error("failed to decode {role} spec: {source}")]
    Input {
        /// Which input failed
        role: DocumentRole,
        /// Underlying decode failure
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Attach the merge role of the input that failed.
    #[must_use]
    pub fn for_role(self, role: DocumentRole) -> Self {
        DecodeError::Input {
            role,
            source: Box::new(self),
        }
    }
}
