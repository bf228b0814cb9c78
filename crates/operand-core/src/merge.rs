//! Deep merge of a default spec template into a changed spec.
//!
//! The changed spec always wins where it says something; the default only
//! fills gaps.
//!
//! # Merge Rules
//!
//! | Default value | Changed value | Result |
//! |---------------|---------------|--------|
//! | any | deep-equal to default | unchanged |
//! | any | absent or `null` | default copied in |
//! | object | object | reconciled key by key |
//! | object | scalar or array | changed value kept |
//! | scalar or array | any non-null | changed value kept |
//!
//! Keys present only in the changed spec are never touched.

use serde_json::Value;

use crate::document::{decode, value_kind, DecodeError, Document, DocumentRole};

/// Merge a default spec into a changed spec, both given as raw JSON.
///
/// - Both inputs empty: returns an empty document.
/// - One input empty: returns the other decoded as-is.
/// - Otherwise: returns the changed spec with gaps filled from the default.
///
/// A side that fails to decode is logged and treated as an empty document.
/// Use [`try_merge_cr`] to receive the decode error instead.
///
/// # Examples
///
/// ```
/// use operand_core::merge_cr;
/// use serde_json::json;
///
/// let merged = merge_cr(
///     br#"{"size": "small", "storage": {"class": "standard", "gb": 10}}"#,
///     br#"{"storage": {"gb": 50}}"#,
/// );
///
/// assert_eq!(merged["size"], json!("small"));
/// assert_eq!(merged["storage"], json!({"class": "standard", "gb": 50}));
/// ```
#[must_use]
pub fn merge_cr(default_cr: &[u8], changed_cr: &[u8]) -> Document {
    let default_doc = decode_input(default_cr, DocumentRole::Default).unwrap_or_else(degrade);
    let changed_doc = decode_input(changed_cr, DocumentRole::Changed).unwrap_or_else(degrade);
    combine(default_doc, changed_doc)
}

/// Merge a default spec into a changed spec, propagating decode failures.
///
/// Same rules as [`merge_cr`].
///
/// # Errors
///
/// Returns [`DecodeError::Input`] naming the side that could not be decoded.
pub fn try_merge_cr(default_cr: &[u8], changed_cr: &[u8]) -> Result<Document, DecodeError> {
    let default_doc = decode_input(default_cr, DocumentRole::Default)?;
    let changed_doc = decode_input(changed_cr, DocumentRole::Changed)?;
    Ok(combine(default_doc, changed_doc))
}

/// Merge two decoded documents.
///
/// Neither input is modified; the result starts as a copy of `changed`.
///
/// # Examples
///
/// ```
/// use operand_core::merge_documents;
/// use serde_json::json;
///
/// let default = json!({"a": {"x": 1, "y": 2}});
/// let changed = json!({"a": {"x": 9}});
///
/// let merged = merge_documents(
///     default.as_object().unwrap(),
///     changed.as_object().unwrap(),
/// );
/// assert_eq!(serde_json::Value::Object(merged), json!({"a": {"x": 9, "y": 2}}));
/// ```
#[must_use]
pub fn merge_documents(default: &Document, changed: &Document) -> Document {
    let mut merged = changed.clone();
    for (key, default_value) in default {
        reconcile_key(key, default_value, &mut merged);
    }
    tracing::debug!(
        default_keys = default.len(),
        changed_keys = changed.len(),
        merged_keys = merged.len(),
        "Merged spec"
    );
    merged
}

/// Decode one side of a merge; an empty buffer means "not supplied".
fn decode_input(bytes: &[u8], role: DocumentRole) -> Result<Option<Document>, DecodeError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    decode(bytes).map(Some).map_err(|e| e.for_role(role))
}

fn degrade(err: DecodeError) -> Option<Document> {
    tracing::error!(error = %err, "Treating undecodable spec as empty");
    Some(Document::new())
}

fn combine(default_doc: Option<Document>, changed_doc: Option<Document>) -> Document {
    match (default_doc, changed_doc) {
        (None, None) => Document::new(),
        (Some(doc), None) | (None, Some(doc)) => doc,
        (Some(default_doc), Some(changed_doc)) => merge_documents(&default_doc, &changed_doc),
    }
}

/// Reconcile `key` of `target` against the default value for that key.
///
/// `target` holds the changed value at this level, so the current entry is
/// the changed value being compared.
fn reconcile_key(key: &str, default_value: &Value, target: &mut Document) {
    let Some(existing) = target.get_mut(key) else {
        tracing::trace!(key, "Filling missing key from default");
        target.insert(key.to_string(), default_value.clone());
        return;
    };

    if *existing == *default_value {
        return;
    }

    if existing.is_null() {
        tracing::trace!(key, "Filling null key from default");
        *existing = default_value.clone();
        return;
    }

    match (default_value, existing) {
        (Value::Object(default_map), Value::Object(existing_map)) => {
            for (child_key, child_default) in default_map {
                reconcile_key(child_key, child_default, existing_map);
            }
        }
        (Value::Object(_), other) => {
            tracing::trace!(
                key,
                changed = value_kind(other),
                "Keeping changed value over default object"
            );
        }
        // Explicitly set non-null values win.
        _ => {}
    }
}
