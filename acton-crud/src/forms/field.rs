//! Form field kinds and resolution
//!
//! Maps a property's schema and its form hints to the widget a View Layer
//! should draw. Resolution is total: anything it cannot place becomes
//! [`WidgetKind::Unknown`], which the View Layer renders as an explicit
//! "unknown field type" placeholder.

use serde_json::{Map, Value};
use std::fmt;

use crate::schema::{FieldHints, Format, PropertySchema, PropertyType, Schema, UiSchema};

/// Semantic widget kind of a form field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Numeric entry
    Number,
    /// Free text entry
    Text,
    /// Path to a binary payload, referenced by URL
    DataUrl,
    /// Calendar date
    Date,
    /// Paired date and time entry
    DateTime,
    /// Caller-declared widget (e.g. an upload button), not interpreted here
    Custom(String),
    /// Type with no known widget; carries the raw type name
    Unknown(String),
}

impl WidgetKind {
    /// Built-in kind for a widget name, if it names one
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "number" => Some(Self::Number),
            "string" => Some(Self::Text),
            "data-url" => Some(Self::DataUrl),
            "date" => Some(Self::Date),
            "date-time" => Some(Self::DateTime),
            _ => None,
        }
    }

    /// Get the widget name
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Number => "number",
            Self::Text => "string",
            Self::DataUrl => "data-url",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Custom(name) | Self::Unknown(name) => name,
        }
    }

    /// HTML input type a View Layer would use for this kind
    ///
    /// Custom and unknown kinds have no standard input.
    #[must_use]
    pub const fn input_type(&self) -> Option<InputType> {
        match self {
            Self::Number => Some(InputType::Number),
            Self::Text => Some(InputType::Text),
            Self::DataUrl => Some(InputType::Url),
            Self::Date => Some(InputType::Date),
            Self::DateTime => Some(InputType::DateTimeLocal),
            Self::Custom(_) | Self::Unknown(_) => None,
        }
    }

    /// Check whether this is the unknown placeholder kind
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTML input types used by the built-in widget kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    /// Text input (default)
    #[default]
    Text,
    /// Number input
    Number,
    /// URL input
    Url,
    /// Date input
    Date,
    /// Date and time input
    DateTimeLocal,
}

impl InputType {
    /// Get the HTML type attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Url => "url",
            Self::Date => "date",
            Self::DateTimeLocal => "datetime-local",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve the widget kind of a property
///
/// Precedence:
/// 1. `ui:widget` hint, verbatim
/// 2. `integer`/`float` -> [`WidgetKind::Number`]
/// 3. `string` by format: `data-url`, `date`, `date-time`, else text
/// 4. the raw type name, [`WidgetKind::Unknown`] if it names no widget
///
/// # Examples
///
/// ```rust
/// use acton_crud::forms::{resolve_field_kind, WidgetKind};
/// use acton_crud::schema::{FieldHints, PropertySchema};
///
/// let when = PropertySchema::new("string").with_format("date-time");
/// assert_eq!(resolve_field_kind(&when, None), WidgetKind::DateTime);
///
/// let custom = FieldHints::widget("calendar");
/// assert_eq!(
///     resolve_field_kind(&when, Some(&custom)),
///     WidgetKind::Custom("calendar".into())
/// );
/// ```
#[must_use]
pub fn resolve_field_kind(property: &PropertySchema, hints: Option<&FieldHints>) -> WidgetKind {
    if let Some(widget) = hints.and_then(|h| h.widget.as_deref()) {
        return WidgetKind::from_name(widget).unwrap_or_else(|| WidgetKind::Custom(widget.into()));
    }

    match &property.property_type {
        PropertyType::Integer | PropertyType::Float => WidgetKind::Number,
        PropertyType::String => match property.format {
            Some(Format::DataUrl) => WidgetKind::DataUrl,
            Some(Format::Date) => WidgetKind::Date,
            Some(Format::DateTime) => WidgetKind::DateTime,
            _ => WidgetKind::Text,
        },
        other => {
            let raw = other.as_str();
            WidgetKind::from_name(raw).unwrap_or_else(|| WidgetKind::Unknown(raw.to_string()))
        }
    }
}

/// A visible form field with its resolved widget
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Field name (used for submission and as label)
    pub name: String,
    /// Resolved widget kind
    pub kind: WidgetKind,
    /// Widget options from `ui:options`
    pub options: Map<String, Value>,
}

impl FormField {
    /// Label shown next to the widget
    #[must_use]
    pub fn label(&self) -> &str {
        &self.name
    }

    /// Check whether the View Layer must draw the unknown placeholder
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.kind.is_unknown()
    }
}

/// Resolve every field visible on the form surface, in property order
#[must_use]
pub fn resolve_form_fields(schema: &Schema, form_ui: &UiSchema) -> Vec<FormField> {
    form_ui
        .visible(schema)
        .map(|(name, property)| {
            let hints = form_ui.get(name);
            FormField {
                name: name.clone(),
                kind: resolve_field_kind(property, hints),
                options: hints.map(|h| h.options.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn string_with(format: &str) -> PropertySchema {
        PropertySchema::new("string").with_format(format)
    }

    #[test]
    fn test_numeric_types_resolve_to_number() {
        assert_eq!(
            resolve_field_kind(&PropertySchema::new("integer"), None),
            WidgetKind::Number
        );
        assert_eq!(
            resolve_field_kind(&PropertySchema::new("float"), None),
            WidgetKind::Number
        );
    }

    #[test]
    fn test_string_formats() {
        assert_eq!(resolve_field_kind(&string_with("data-url"), None), WidgetKind::DataUrl);
        assert_eq!(resolve_field_kind(&string_with("date"), None), WidgetKind::Date);
        assert_eq!(resolve_field_kind(&string_with("date-time"), None), WidgetKind::DateTime);
        assert_eq!(resolve_field_kind(&string_with("email"), None), WidgetKind::Text);
        assert_eq!(resolve_field_kind(&PropertySchema::new("string"), None), WidgetKind::Text);
    }

    #[test]
    fn test_override_wins() {
        let hints = FieldHints::widget("custom");
        assert_eq!(
            resolve_field_kind(&string_with("date-time"), Some(&hints)),
            WidgetKind::Custom("custom".into())
        );

        let uploader = FieldHints::widget("s3-uploader");
        assert_eq!(
            resolve_field_kind(&string_with("data-url"), Some(&uploader)).as_str(),
            "s3-uploader"
        );
    }

    #[test]
    fn test_override_naming_builtin_kind() {
        let hints = FieldHints::widget("number");
        assert_eq!(
            resolve_field_kind(&PropertySchema::new("string"), Some(&hints)),
            WidgetKind::Number
        );
    }

    #[test]
    fn test_hints_without_widget_do_not_override() {
        let hints = FieldHints::default().option("multiLine", true);
        assert_eq!(
            resolve_field_kind(&PropertySchema::new("integer"), Some(&hints)),
            WidgetKind::Number
        );
    }

    #[test]
    fn test_unrecognized_type_passes_through() {
        assert_eq!(
            resolve_field_kind(&PropertySchema::new("boolean"), None),
            WidgetKind::Unknown("boolean".into())
        );
        assert_eq!(
            resolve_field_kind(&PropertySchema::new("number"), None),
            WidgetKind::Number
        );
        assert!(resolve_field_kind(&PropertySchema::new("geo"), None).is_unknown());
    }

    #[test]
    fn test_input_types() {
        assert_eq!(WidgetKind::Number.input_type(), Some(InputType::Number));
        assert_eq!(WidgetKind::DataUrl.input_type(), Some(InputType::Url));
        assert_eq!(
            WidgetKind::DateTime.input_type().map(|t| t.as_str()),
            Some("datetime-local")
        );
        assert_eq!(WidgetKind::Custom("x".into()).input_type(), None);
    }

    #[test]
    fn test_resolve_form_fields_skips_hidden_and_keeps_options() {
        let schema = Schema::new("Post")
            .property("id", PropertySchema::new("integer"))
            .property("body", PropertySchema::new("string"))
            .property("flag", PropertySchema::new("boolean"));
        let ui = UiSchema::new()
            .field("id", FieldHints::hidden())
            .field("body", FieldHints::default().option("multiLine", true));

        let fields = resolve_form_fields(&schema, &ui);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "body");
        assert_eq!(fields[0].label(), "body");
        assert_eq!(fields[0].kind, WidgetKind::Text);
        assert_eq!(fields[0].options.get("multiLine"), Some(&Value::Bool(true)));
        assert!(fields[1].is_unknown());
    }

    proptest! {
        #[test]
        fn prop_numeric_without_override_is_number(
            numeric in prop_oneof![Just("integer"), Just("float")],
            format in proptest::option::of("[a-z-]{0,10}"),
        ) {
            let mut property = PropertySchema::new(numeric);
            if let Some(format) = format {
                property = property.with_format(format);
            }
            prop_assert_eq!(resolve_field_kind(&property, None), WidgetKind::Number);
        }

        #[test]
        fn prop_widget_override_always_wins(
            ty in "[a-z]{1,8}",
            widget in "[a-z][a-z0-9-]{0,12}",
        ) {
            let hints = FieldHints::widget(widget.clone());
            let kind = resolve_field_kind(&PropertySchema::new(ty.as_str()), Some(&hints));
            prop_assert_eq!(kind.as_str(), widget.as_str());
            prop_assert!(!kind.is_unknown());
        }
    }
}
