//! Presentation data handed to the View Layer
//!
//! Nothing here renders markup. These helpers compute the text and rows a
//! renderer needs: dialog titles and button labels, the table header and
//! read-only property lists.

use serde_json::Value;

use crate::config::{FormSettings, TableSettings};
use crate::dialog::{DialogKind, DialogState};
use crate::schema::{Item, Schema};
use crate::table::{Column, DisplayKind, ACTIONS_COLUMN};

/// Text of the open dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    /// Dialog title
    pub title: String,
    /// Label of the confirming button
    pub submit_label: String,
    /// Body text (destroy confirmation only)
    pub message: Option<String>,
}

/// Presentation of a dialog state, `None` while hidden
///
/// # Examples
///
/// ```rust
/// use acton_crud::config::FormSettings;
/// use acton_crud::dialog::DialogState;
/// use acton_crud::schema::Schema;
/// use acton_crud::view::dialog_view;
///
/// let schema = Schema::new("Widget");
/// let view = dialog_view(&DialogState::creating(), &schema, &FormSettings::default()).unwrap();
/// assert_eq!(view.title, "New Widget");
/// assert_eq!(view.submit_label, "Create");
/// ```
#[must_use]
pub fn dialog_view(
    state: &DialogState,
    schema: &Schema,
    forms: &FormSettings,
) -> Option<DialogView> {
    let title = &schema.title;
    match state.kind() {
        DialogKind::Hidden => None,
        DialogKind::New => Some(DialogView {
            title: format!("New {title}"),
            submit_label: forms.create_label.clone(),
            message: None,
        }),
        DialogKind::Edit => Some(DialogView {
            title: format!("Edit {title}"),
            submit_label: forms.update_label.clone(),
            message: None,
        }),
        DialogKind::Destroy => Some(DialogView {
            title: "Confirmation".to_string(),
            submit_label: "OK".to_string(),
            message: Some(format!("Are you sure you want to delete the {title}?")),
        }),
    }
}

/// Header cells of a table: one per column, then the actions column
#[must_use]
pub fn header_row(columns: &[Column]) -> Vec<&str> {
    columns
        .iter()
        .map(|c| c.name.as_str())
        .chain(std::iter::once(ACTIONS_COLUMN))
        .collect()
}

/// Pixel height of a cell, for kinds that draw media inline
#[must_use]
pub const fn cell_height(kind: DisplayKind, table: &TableSettings) -> Option<u32> {
    match kind {
        DisplayKind::Image => Some(table.image_height),
        DisplayKind::Text | DisplayKind::Link | DisplayKind::Audio => None,
    }
}

/// One row of a read-only property list
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry<'a> {
    /// Property name
    pub name: &'a str,
    /// Item value, `None` if missing
    pub value: Option<&'a Value>,
}

/// Name/value rows of an item, one per schema property in order
///
/// Unlike forms and tables, property lists have no UI hints: every property
/// is listed.
#[must_use]
pub fn property_list<'a>(schema: &'a Schema, item: &'a Item) -> Vec<PropertyEntry<'a>> {
    schema
        .properties
        .keys()
        .map(|name| PropertyEntry {
            name: name.as_str(),
            value: item.get(name),
        })
        .collect()
}
