//! Typed resource schema, UI hints and items
//!
//! A resource is described by a JSON-Schema-like document:
//!
//! ```json
//! {
//!   "title": "Track",
//!   "properties": {
//!     "id":        { "type": "integer" },
//!     "name":      { "type": "string" },
//!     "audio_url": { "type": "string", "format": "data-url" }
//!   }
//! }
//! ```
//!
//! The document is read once into [`Schema`] at the boundary. Each rendering
//! surface (form, table) gets its own [`UiSchema`] of per-field hints:
//!
//! ```json
//! { "id": { "ui:widget": "hidden" }, "audio_url": { "ui:widget": "audio" } }
//! ```
//!
//! Unknown `type` and `format` strings are kept as explicit `Other` variants
//! so resolution downstream stays total.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::Result;

/// Widget hint value that removes a field from a surface
pub const HIDDEN_WIDGET: &str = "hidden";

/// JSON type of a property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `float`
    Float,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `object`
    Object,
    /// `array`
    Array,
    /// Any other type name, kept verbatim
    Other(String),
}

impl PropertyType {
    /// Get the type name as written in the schema
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for PropertyType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "string" => Self::String,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "object" => Self::Object,
            "array" => Self::Array,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for PropertyType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<PropertyType> for String {
    fn from(ty: PropertyType) -> Self {
        match ty {
            PropertyType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String format annotation of a property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Format {
    /// `data-url`: the value is a path to a binary payload
    DataUrl,
    /// `date`
    Date,
    /// `date-time`
    DateTime,
    /// Any other format, kept verbatim
    Other(String),
}

impl Format {
    /// Get the format name as written in the schema
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::DataUrl => "data-url",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Format {
    fn from(name: String) -> Self {
        match name.as_str() {
            "data-url" => Self::DataUrl,
            "date" => Self::Date,
            "date-time" => Self::DateTime,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for Format {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<Format> for String {
    fn from(format: Format) -> Self {
        match format {
            Format::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Schema of a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Optional format annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Remaining keys (`description`, `default`, ...), ignored by resolution
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PropertySchema {
    /// Create a property of the given type
    #[must_use]
    pub fn new(property_type: impl Into<PropertyType>) -> Self {
        Self {
            property_type: property_type.into(),
            format: None,
            extra: Map::new(),
        }
    }

    /// Set the format annotation
    #[must_use]
    pub fn with_format(mut self, format: impl Into<Format>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Check for the given format
    #[must_use]
    pub fn has_format(&self, format: &Format) -> bool {
        self.format.as_ref() == Some(format)
    }
}

/// Description of a resource type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Resource name; action namespace and dialog title
    pub title: String,
    /// Properties in document order
    #[serde(default)]
    pub properties: IndexMap<String, PropertySchema>,
}

impl Schema {
    /// Create an empty schema with the given title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            properties: IndexMap::new(),
        }
    }

    /// Append a property
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Read a schema from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a schema from an already parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Per-field UI hints for one surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldHints {
    /// Widget override (`ui:widget`)
    #[serde(rename = "ui:widget", default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    /// Options forwarded to the widget (`ui:options`)
    #[serde(rename = "ui:options", default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl FieldHints {
    /// Create hints with a widget override
    #[must_use]
    pub fn widget(widget: impl Into<String>) -> Self {
        Self {
            widget: Some(widget.into()),
            options: Map::new(),
        }
    }

    /// Hints that hide the field from its surface
    #[must_use]
    pub fn hidden() -> Self {
        Self::widget(HIDDEN_WIDGET)
    }

    /// Add a widget option
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Check whether the field is hidden on this surface
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.widget.as_deref() == Some(HIDDEN_WIDGET)
    }
}

/// Field hints for one rendering surface, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiSchema(IndexMap<String, FieldHints>);

impl UiSchema {
    /// Create an empty UI schema
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add hints for a field
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, hints: FieldHints) -> Self {
        self.0.insert(name.into(), hints);
        self
    }

    /// Hints for a field, if any
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldHints> {
        self.0.get(name)
    }

    /// Check whether a field is hidden on this surface
    #[must_use]
    pub fn is_hidden(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldHints::is_hidden)
    }

    /// Iterate the schema's properties that are visible on this surface
    pub fn visible<'a>(
        &'a self,
        schema: &'a Schema,
    ) -> impl Iterator<Item = (&'a String, &'a PropertySchema)> + 'a {
        schema
            .properties
            .iter()
            .filter(move |(name, _)| !self.is_hidden(name))
    }

    /// Read a UI schema from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A resource record: field name to value
///
/// Items are snapshots. [`Item::with_field`] returns a new snapshot and never
/// touches the one it was called on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    /// Create an empty item
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an item from a JSON object value
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Copy of this item with one field overwritten
    #[must_use]
    pub fn with_field(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = self.0.clone();
        fields.insert(name.into(), value.into());
        Self(fields)
    }

    /// Value of a field
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Check whether the item has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate fields
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Convert into a JSON object value
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Item {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl FromIterator<(String, Value)> for Item {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_from_json_keeps_property_order() {
        let schema = Schema::from_json(
            r#"{
                "title": "Track",
                "properties": {
                    "zeta": { "type": "string" },
                    "alpha": { "type": "integer" },
                    "cover": { "type": "string", "format": "data-url", "description": "art" }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(schema.title, "Track");
        let names: Vec<&str> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "cover"]);

        let cover = &schema.properties["cover"];
        assert_eq!(cover.property_type, PropertyType::String);
        assert!(cover.has_format(&Format::DataUrl));
        assert_eq!(cover.extra.get("description"), Some(&json!("art")));
    }

    #[test]
    fn test_unknown_type_and_format_are_kept() {
        let property: PropertySchema =
            serde_json::from_value(json!({ "type": "geo", "format": "wkt" })).unwrap();
        assert_eq!(property.property_type, PropertyType::Other("geo".into()));
        assert_eq!(property.format, Some(Format::Other("wkt".into())));
        assert_eq!(property.property_type.to_string(), "geo");
    }

    #[test]
    fn test_property_round_trips_names() {
        let property = PropertySchema::new("string").with_format("date-time");
        let value = serde_json::to_value(&property).unwrap();
        assert_eq!(value, json!({ "type": "string", "format": "date-time" }));
    }

    #[test]
    fn test_missing_type_is_schema_error() {
        let err = Schema::from_value(json!({ "title": "X", "properties": { "a": {} } }));
        assert!(err.is_err());
    }

    #[test]
    fn test_ui_schema_hidden() {
        let ui = UiSchema::from_json(
            r#"{
                "id": { "ui:widget": "hidden" },
                "bio": { "ui:options": { "multiLine": true } }
            }"#,
        )
        .unwrap();

        assert!(ui.is_hidden("id"));
        assert!(!ui.is_hidden("bio"));
        assert!(!ui.is_hidden("missing"));
        assert_eq!(
            ui.get("bio").unwrap().options.get("multiLine"),
            Some(&json!(true))
        );
    }

    #[test]
    fn test_visible_properties_skip_hidden() {
        let schema = Schema::new("User")
            .property("id", PropertySchema::new("integer"))
            .property("name", PropertySchema::new("string"));
        let ui = UiSchema::new().field("id", FieldHints::hidden());

        let visible: Vec<&String> = ui.visible(&schema).map(|(name, _)| name).collect();
        assert_eq!(visible, vec!["name"]);
    }

    #[test]
    fn test_item_with_field_leaves_original_untouched() {
        let original = Item::new();
        let edited = original.with_field("name", "Ann");

        assert!(original.is_empty());
        assert_eq!(edited.get("name"), Some(&json!("Ann")));
        assert_eq!(edited.len(), 1);

        let again = edited.with_field("name", "Bea");
        assert_eq!(edited.get("name"), Some(&json!("Ann")));
        assert_eq!(again.get("name"), Some(&json!("Bea")));
    }

    #[test]
    fn test_item_from_value() {
        let item = Item::from_value(json!({ "id": 5, "name": "Bob" })).unwrap();
        assert_eq!(item.get("id"), Some(&json!(5)));
        assert_eq!(item.into_value(), json!({ "id": 5, "name": "Bob" }));

        assert!(Item::from_value(json!([1, 2])).is_err());
    }
}
