//! Stored block streams.
//!
//! Provides:
//! - `ContentBlock`: one `{type, id, value}` node of a stream
//! - `ListValue`: list-block payloads in either storage layout
//! - `lenient`: deserializers for reference and scalar fields that older
//!   content stored in more than one shape

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One tagged node of an ordered block stream.
///
/// `value` stays untyped here; the variant's builder decodes it into its own
/// struct so a schema mismatch only affects that one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Variant tag (e.g. `"multi_image_content"`).
    #[serde(rename = "type")]
    pub variant: String,

    /// Stable per-instance id assigned by the editor. Very old content may
    /// lack one.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub value: Value,
}

impl ContentBlock {
    pub fn new(variant: impl Into<String>, id: impl Into<String>, value: Value) -> Self {
        Self {
            variant: variant.into(),
            id: Some(id.into()),
            value,
        }
    }

    /// Output id of this block: `"{variant}_{identity}"`.
    ///
    /// Blocks without a stored id use their 1-based position in the stream,
    /// which is stable for an unchanged stream.
    pub fn output_id(&self, position: usize) -> String {
        match self.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => format!("{}_{id}", self.variant),
            None => format!("{}_{}", self.variant, position + 1),
        }
    }
}

/// Payload of a list block.
///
/// Current content stores each child as `{"type": "item", "value": ..., "id": ...}`;
/// content saved before that layout stores bare child values. Both decode to
/// the same items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListValue<T>(pub Vec<ListItem<T>>);

/// A single child of a list block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem<T> {
    pub id: Option<String>,
    pub value: T,
}

impl<T> Default for ListValue<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> ListValue<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|item| &item.value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Deserialize)]
enum ItemTag {
    #[serde(rename = "item")]
    Item,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItem<T> {
    Wrapped {
        #[serde(rename = "type")]
        _tag: ItemTag,
        value: T,
        #[serde(default)]
        id: Option<String>,
    },
    Bare(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ListValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Vec<RawItem<T>>>::deserialize(deserializer)?.unwrap_or_default();
        let items = raw
            .into_iter()
            .map(|item| match item {
                RawItem::Wrapped { value, id, .. } => ListItem { id, value },
                RawItem::Bare(value) => ListItem { id: None, value },
            })
            .collect();
        Ok(Self(items))
    }
}

/// Return the string when it has non-whitespace content.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Deserializers tolerant of the shapes references were stored in over time.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// A page or image reference: an integer, a numeric string, an expanded
    /// `{"id": N, ...}` object, or null/empty for "no reference".
    pub(crate) fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(id_from_value))
    }

    fn id_from_value(value: &Value) -> Option<u64> {
        match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Object(map) => map.get("id").and_then(id_from_value),
            _ => None,
        }
    }
}
