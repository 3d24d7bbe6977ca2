//! acton-crud: schema-driven CRUD building blocks for acton applications
//!
//! Turns a JSON-Schema-like resource description into everything an admin
//! screen needs apart from markup:
//!
//! - **Lifecycle actions**: 25 identifiers per resource
//!   (`"{title}/{operation}/{phase}"`) with payload creators, plus a
//!   registry that catches namespace collisions
//! - **Form fields**: the widget each visible property gets
//! - **Table columns**: the display each visible property gets
//! - **Dialog state**: which modal (create, edit, destroy) is open, the
//!   form's working copy, and delegation of committed dialogs to the host
//!
//! Rendering and network I/O stay with the host. Committed dialogs and page
//! changes are handed to a caller-supplied [`dialog::ResourceHandler`].
//!
//! # Quick Start
//!
//! ```rust
//! use acton_crud::prelude::*;
//!
//! # fn main() -> acton_crud::error::Result<()> {
//! let schema = Schema::from_json(
//!     r#"{
//!         "title": "Track",
//!         "properties": {
//!             "id":     { "type": "integer" },
//!             "name":   { "type": "string" },
//!             "sample": { "type": "string", "format": "data-url" }
//!         }
//!     }"#,
//! )?;
//! let form_ui = UiSchema::from_json(r#"{ "id": { "ui:widget": "hidden" } }"#)?;
//! let table_ui = UiSchema::from_json(r#"{ "sample": { "ui:widget": "audio" } }"#)?;
//!
//! let mut table = ResourceTable::new(schema, Callbacks::new().with_create(|item| {
//!     tracing::info!(?item, "create requested");
//! }))
//! .form_ui(form_ui)
//! .table_ui(table_ui);
//!
//! assert_eq!(table.form_fields().len(), 2);
//! assert_eq!(table.columns()[2].kind, DisplayKind::Audio);
//!
//! table.request_new();
//! table.edit_field("name", "Intro")?;
//! table.submit_form()?;
//! assert!(table.dialog().is_hidden());
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod config;
pub mod dialog;
pub mod error;
pub mod forms;
pub mod observability;
pub mod resource;
pub mod schema;
pub mod table;
pub mod url;
pub mod view;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use acton_crud::prelude::*;
    //! ```

    // Schema records
    pub use crate::schema::{
        FieldHints, Format, Item, PropertySchema, PropertyType, Schema, UiSchema,
    };

    // Resolution
    pub use crate::forms::{
        resolve_field_kind, resolve_form_fields, FormField, FormState, WidgetKind,
    };
    pub use crate::table::{resolve_column_kind, resolve_columns, Column, DisplayKind, Pagination};

    // Actions
    pub use crate::actions::{
        generate_action_set, Action, ActionRegistry, ActionSet, Operation, Phase,
    };

    // Dialog state
    pub use crate::dialog::{Callbacks, DialogKind, DialogState, ResourceHandler};
    pub use crate::resource::ResourceTable;

    // Presentation
    pub use crate::url::Origin;
    pub use crate::view::{dialog_view, property_list, DialogView};

    // Configuration and errors
    pub use crate::config::CrudConfig;
    pub use crate::error::CrudError;
}
