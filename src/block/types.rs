//! Core block types.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::caret::CaretTarget;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a process-unique block id.
///
/// Ids are opaque and only meaningful within one editing session; loaders
/// reassign them so the uniqueness invariant holds regardless of input.
pub fn fresh_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// The element kind of a block.
///
/// Serialized with the original tag spellings (`"p"`, `"a"`, `"h1"`..`"h6"`)
/// so block documents stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BlockTag {
    #[default]
    Paragraph,
    Link,
    /// Heading with level 1..=6.
    Heading(u8),
}

impl BlockTag {
    /// All tags, in the order the style panel cycles through them.
    pub const ALL: [Self; 8] = [
        Self::Paragraph,
        Self::Link,
        Self::Heading(1),
        Self::Heading(2),
        Self::Heading(3),
        Self::Heading(4),
        Self::Heading(5),
        Self::Heading(6),
    ];

    /// The serialized tag name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "p",
            Self::Link => "a",
            Self::Heading(1) => "h1",
            Self::Heading(2) => "h2",
            Self::Heading(3) => "h3",
            Self::Heading(4) => "h4",
            Self::Heading(5) => "h5",
            Self::Heading(_) => "h6",
        }
    }

    pub const fn is_link(self) -> bool {
        matches!(self, Self::Link)
    }

    /// The next tag in panel cycle order, wrapping around.
    pub fn cycle_next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The previous tag in panel cycle order, wrapping around.
    pub fn cycle_prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl From<BlockTag> for String {
    fn from(tag: BlockTag) -> Self {
        tag.as_str().to_string()
    }
}

impl TryFrom<String> for BlockTag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "p" => Ok(Self::Paragraph),
            "a" => Ok(Self::Link),
            other => {
                if let Some(level) = other.strip_prefix('h') {
                    if let Ok(level @ 1..=6) = level.parse::<u8>() {
                        return Ok(Self::Heading(level));
                    }
                }
                Err(format!("unknown block tag {other:?}"))
            }
        }
    }
}

/// A value in a block's style or attribute map.
///
/// Both maps are open: any property name is accepted and carried verbatim,
/// with string or numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Text(String),
    Number(f64),
}

impl PropValue {
    /// The value as text when it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Number(_) => None,
        }
    }

    /// The value rendered for display and panel editing.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Open mapping of CSS-like property names (or attribute names) to values.
pub type PropMap = BTreeMap<String, PropValue>;

/// One independently editable unit of text.
///
/// A block owns its tag, plain-text contents, an open style map, an open
/// attribute map (only meaningful for link blocks, but never stripped), and
/// an optional transient caret instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Unique within the owning list; regenerated when blocks merge.
    #[serde(default = "fresh_id")]
    pub id: u64,
    #[serde(default)]
    pub tag: BlockTag,
    #[serde(default)]
    pub contents: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: PropMap,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: PropMap,
    /// Pending caret placement, consumed once by the focus layer.
    /// Edit-session-only; never serialized.
    #[serde(skip)]
    pub caret: Option<CaretTarget>,
}

impl Block {
    /// Create a paragraph block with the given contents and a fresh id.
    pub fn paragraph(contents: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            tag: BlockTag::Paragraph,
            contents: contents.into(),
            style: PropMap::new(),
            attributes: PropMap::new(),
            caret: None,
        }
    }

    /// Contents length in characters (caret offsets are character counts).
    pub fn text_len(&self) -> usize {
        self.contents.chars().count()
    }
}

impl Default for Block {
    /// The default empty paragraph used whenever a list needs a filler block.
    fn default() -> Self {
        Self::paragraph("")
    }
}

/// A partial-field update merged onto an existing block by
/// [`BlockList::change`](super::BlockList::change).
///
/// Unset fields leave the record untouched. Ids are managed by the list and
/// cannot be patched directly.
#[derive(Debug, Clone, Default)]
pub struct BlockPatch {
    pub tag: Option<BlockTag>,
    pub contents: Option<String>,
    pub style: Option<PropMap>,
    pub attributes: Option<PropMap>,
    pub caret: Option<CaretTarget>,
}

impl BlockPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: BlockTag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    pub fn style(mut self, style: PropMap) -> Self {
        self.style = Some(style);
        self
    }

    pub fn attributes(mut self, attributes: PropMap) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub const fn caret(mut self, caret: CaretTarget) -> Self {
        self.caret = Some(caret);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = fresh_id();
        let b = fresh_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_tag_roundtrips_through_string() {
        for tag in BlockTag::ALL {
            let s: String = tag.into();
            assert_eq!(BlockTag::try_from(s).unwrap(), tag);
        }
    }

    #[test]
    fn test_tag_rejects_unknown_names() {
        assert!(BlockTag::try_from("h0".to_string()).is_err());
        assert!(BlockTag::try_from("h7".to_string()).is_err());
        assert!(BlockTag::try_from("div".to_string()).is_err());
    }

    #[test]
    fn test_tag_cycle_visits_every_variant() {
        let mut tag = BlockTag::Paragraph;
        let mut seen = Vec::new();
        for _ in 0..BlockTag::ALL.len() {
            seen.push(tag);
            tag = tag.cycle_next();
        }
        assert_eq!(tag, BlockTag::Paragraph);
        assert_eq!(seen, BlockTag::ALL);
    }

    #[test]
    fn test_tag_cycle_prev_inverts_next() {
        for tag in BlockTag::ALL {
            assert_eq!(tag.cycle_next().cycle_prev(), tag);
        }
    }

    #[test]
    fn test_block_serializes_without_caret() {
        let mut block = Block::paragraph("hello");
        block.caret = Some(CaretTarget::Last);
        let json = serde_json::to_string(&block).unwrap();
        assert!(!json.contains("caret"));
    }

    #[test]
    fn test_block_deserializes_with_defaults() {
        let block: Block = serde_json::from_str(r#"{"contents":"hi"}"#).unwrap();
        assert_eq!(block.tag, BlockTag::Paragraph);
        assert_eq!(block.contents, "hi");
        assert!(block.style.is_empty());
        assert!(block.caret.is_none());
    }

    #[test]
    fn test_prop_value_accepts_strings_and_numbers() {
        let style: PropMap =
            serde_json::from_str(r##"{"color":"#ff0000","font-size":16}"##).unwrap();
        assert_eq!(style["color"].as_text(), Some("#ff0000"));
        assert_eq!(style["font-size"], PropValue::Number(16.0));
    }

    #[test]
    fn test_text_len_counts_chars_not_bytes() {
        let block = Block::paragraph("café");
        assert_eq!(block.text_len(), 4);
    }
}
