//! Table column kinds and resolution
//!
//! Coarser than form resolution: only `data-url` strings get a specialized
//! display, everything else is text.

use serde_json::Value;
use std::fmt;

use crate::schema::{FieldHints, Format, Item, PropertySchema, PropertyType, Schema, UiSchema};

/// Widget hint that shows a `data-url` column as an image
pub const IMAGE_WIDGET: &str = "img";

/// Widget hint that shows a `data-url` column as an audio player
pub const AUDIO_WIDGET: &str = "audio";

/// Semantic display kind of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayKind {
    /// Plain value
    Text,
    /// Hyperlink to the value
    Link,
    /// Image with a link to the value
    Image,
    /// Audio player
    Audio,
}

impl DisplayKind {
    /// Get the display kind name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Link => "link",
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for DisplayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the display kind of a property
///
/// # Examples
///
/// ```rust
/// use acton_crud::schema::{FieldHints, PropertySchema};
/// use acton_crud::table::{resolve_column_kind, DisplayKind};
///
/// let cover = PropertySchema::new("string").with_format("data-url");
/// assert_eq!(resolve_column_kind(&cover, None), DisplayKind::Link);
/// assert_eq!(
///     resolve_column_kind(&cover, Some(&FieldHints::widget("img"))),
///     DisplayKind::Image
/// );
/// ```
#[must_use]
pub fn resolve_column_kind(property: &PropertySchema, hints: Option<&FieldHints>) -> DisplayKind {
    let is_data_url =
        property.property_type == PropertyType::String && property.has_format(&Format::DataUrl);
    if !is_data_url {
        return DisplayKind::Text;
    }

    match hints.and_then(|h| h.widget.as_deref()) {
        Some(IMAGE_WIDGET) => DisplayKind::Image,
        Some(AUDIO_WIDGET) => DisplayKind::Audio,
        _ => DisplayKind::Link,
    }
}

/// A visible table column with its resolved display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Field name, also the header text
    pub name: String,
    /// Resolved display kind
    pub kind: DisplayKind,
}

impl Column {
    /// Cell of this column for an item
    #[must_use]
    pub fn cell<'a>(&self, item: &'a Item) -> Cell<'a> {
        Cell {
            kind: self.kind,
            value: item.get(&self.name),
        }
    }
}

/// One rendered table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<'a> {
    /// How to display the value
    pub kind: DisplayKind,
    /// Raw value, `None` if the item lacks the field
    pub value: Option<&'a Value>,
}

impl Cell<'_> {
    /// Value as display text (strings unquoted, missing as empty)
    #[must_use]
    pub fn text(&self) -> String {
        match self.value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Resolve every column visible on the table surface, in property order
#[must_use]
pub fn resolve_columns(schema: &Schema, table_ui: &UiSchema) -> Vec<Column> {
    table_ui
        .visible(schema)
        .map(|(name, property)| Column {
            name: name.clone(),
            kind: resolve_column_kind(property, table_ui.get(name)),
        })
        .collect()
}
