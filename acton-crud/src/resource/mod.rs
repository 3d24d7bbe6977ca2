//! Resource table controller
//!
//! [`ResourceTable`] owns one table's interaction state: which dialog is
//! open, the working copy of an open form, and the caller's pagination. The
//! View Layer reads it to decide what to draw and forwards user intents to
//! it. Every method runs to completion synchronously.
//!
//! ```text
//!            request_new            commit_create / submit_form
//!   Hidden ───────────────► New ──────────────────────────────► Hidden
//!     │  ▲                                  (calls on_create)
//!     │  │ cancel / close (from any state)
//!     │  └──────────────────────────────────────────────────────
//!     │      request_edit(item)     commit_update / submit_form
//!     ├───────────────────────► Edit ─────────────────────────► Hidden
//!     │                                     (calls on_update)
//!     │      request_destroy(item)  commit_destroy
//!     └───────────────────────► Destroy ──────────────────────► Hidden
//!                                           (calls on_destroy)
//! ```
//!
//! Any `request_*` is allowed from any state and replaces whatever was open.
//! Commits are only valid from their matching state; anything else returns
//! [`CrudError::InvalidTransition`] without calling the handler.

use serde_json::Value;

use crate::actions::{generate_action_set, ActionSet};
use crate::config::CrudConfig;
use crate::dialog::{DialogKind, DialogState, ResourceHandler};
use crate::error::{CrudError, Result};
use crate::forms::{resolve_form_fields, FormField, FormState};
use crate::schema::{Item, Schema, UiSchema};
use crate::table::{resolve_columns, Column, Pagination};

/// Interaction state of one resource table
///
/// # Examples
///
/// ```rust
/// use acton_crud::dialog::{Callbacks, DialogKind};
/// use acton_crud::resource::ResourceTable;
/// use acton_crud::schema::Schema;
///
/// let mut table = ResourceTable::new(Schema::new("Widget"), Callbacks::new());
/// table.request_new();
/// table.edit_field("name", "Ann").unwrap();
/// table.submit_form().unwrap();
/// assert_eq!(table.dialog().kind(), DialogKind::Hidden);
/// ```
#[derive(Debug)]
pub struct ResourceTable<H> {
    schema: Schema,
    form_ui: UiSchema,
    table_ui: UiSchema,
    config: CrudConfig,
    handler: H,
    dialog: DialogState,
    form: Option<FormState>,
    items: Vec<Item>,
    pagination: Pagination,
}

impl<H: ResourceHandler> ResourceTable<H> {
    /// Create a table with default configuration and no UI hints
    #[must_use]
    pub fn new(schema: Schema, handler: H) -> Self {
        Self::with_config(schema, handler, CrudConfig::default())
    }

    /// Create a table with explicit configuration
    ///
    /// Pagination starts at page 0 with the configured default page size
    /// until the caller supplies its own.
    #[must_use]
    pub fn with_config(schema: Schema, handler: H, config: CrudConfig) -> Self {
        let pagination = Pagination::first_page(config.table.default_per_page);
        Self {
            schema,
            form_ui: UiSchema::default(),
            table_ui: UiSchema::default(),
            config,
            handler,
            dialog: DialogState::hidden(),
            form: None,
            items: Vec::new(),
            pagination,
        }
    }

    /// Set the form surface hints
    #[must_use]
    pub fn form_ui(mut self, form_ui: UiSchema) -> Self {
        self.form_ui = form_ui;
        self
    }

    /// Set the table surface hints
    #[must_use]
    pub fn table_ui(mut self, table_ui: UiSchema) -> Self {
        self.table_ui = table_ui;
        self
    }

    // =========================================================================
    // Caller-supplied data
    // =========================================================================

    /// Replace the items of the current page
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    /// Replace the pagination
    pub fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = pagination;
    }

    /// Resource schema
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &CrudConfig {
        &self.config
    }

    /// Items of the current page
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Current pagination
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// The caller's handler
    #[must_use]
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// The caller's handler, mutably
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    // =========================================================================
    // Resolved surfaces
    // =========================================================================

    /// Visible table columns
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        resolve_columns(&self.schema, &self.table_ui)
    }

    /// Visible form fields
    #[must_use]
    pub fn form_fields(&self) -> Vec<FormField> {
        resolve_form_fields(&self.schema, &self.form_ui)
    }

    /// Lifecycle actions of this resource
    #[must_use]
    pub fn actions(&self) -> ActionSet {
        generate_action_set(&self.schema)
    }

    // =========================================================================
    // Dialog transitions
    // =========================================================================

    /// Current dialog
    #[must_use]
    pub const fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    /// Open form, if a create or edit dialog is showing
    #[must_use]
    pub const fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    /// Open form, mutably (date/time merging, uploads)
    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        self.form.as_mut()
    }

    /// Open the create dialog with an empty item
    pub fn request_new(&mut self) {
        self.transition(DialogState::creating(), Some(FormState::new(Item::new())));
    }

    /// Open the edit dialog on a record
    pub fn request_edit(&mut self, item: Item) {
        let form = FormState::new(item.clone());
        self.transition(DialogState::editing(item), Some(form));
    }

    /// Open the destroy confirmation on a record
    pub fn request_destroy(&mut self, item: Item) {
        self.transition(DialogState::destroying(item), None);
    }

    /// Dismiss whatever is open
    pub fn cancel(&mut self) {
        self.transition(DialogState::hidden(), None);
    }

    /// Dismiss whatever is open; identical to [`Self::cancel`]
    pub fn close(&mut self) {
        self.cancel();
    }

    /// Change one field of the open form's working copy
    pub fn edit_field(&mut self, name: &str, value: impl Into<Value>) -> Result<&Item> {
        let kind = self.dialog.kind();
        match self.form.as_mut() {
            Some(form) => Ok(form.set_value(name, value)),
            None => Err(invalid_transition(&self.schema.title, "edit_field", kind)),
        }
    }

    /// Commit the create dialog
    pub fn commit_create(&mut self, item: Item) -> Result<()> {
        self.expect(DialogKind::New, "commit_create")?;
        self.handler.on_create(item);
        self.cancel();
        Ok(())
    }

    /// Commit the edit dialog with the form's working copy
    pub fn commit_update(&mut self, item: Item) -> Result<()> {
        self.expect(DialogKind::Edit, "commit_update")?;
        self.handler.on_update(item);
        self.cancel();
        Ok(())
    }

    /// Commit the destroy confirmation for the selected record
    pub fn commit_destroy(&mut self) -> Result<()> {
        self.expect(DialogKind::Destroy, "commit_destroy")?;
        let item = self.dialog.item().clone();
        self.handler.on_destroy(item);
        self.cancel();
        Ok(())
    }

    /// Commit the open form with its working copy
    pub fn submit_form(&mut self) -> Result<()> {
        let kind = self.dialog.kind();
        let working = self.form.as_ref().map(|form| form.working().clone());
        match (kind, working) {
            (DialogKind::New, Some(item)) => self.commit_create(item),
            (DialogKind::Edit, Some(item)) => self.commit_update(item),
            _ => Err(invalid_transition(&self.schema.title, "submit_form", kind)),
        }
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Forward a page change with the current page size
    ///
    /// The table's own pagination is left alone; the caller supplies the new
    /// one through [`Self::set_pagination`] once it has the page.
    pub fn change_page(&mut self, page: usize) {
        let per_page = self.pagination.per_page();
        tracing::debug!(resource = %self.schema.title, page, per_page, "page change");
        self.handler.on_page_change(page, per_page);
    }

    fn transition(&mut self, next: DialogState, form: Option<FormState>) {
        tracing::debug!(
            resource = %self.schema.title,
            from = %self.dialog.kind(),
            to = %next.kind(),
            "dialog transition"
        );
        self.dialog = next;
        self.form = form;
    }

    fn expect(&self, expected: DialogKind, action: &'static str) -> Result<()> {
        let kind = self.dialog.kind();
        if kind == expected {
            Ok(())
        } else {
            Err(invalid_transition(&self.schema.title, action, kind))
        }
    }
}

fn invalid_transition(resource: &str, action: &'static str, state: DialogKind) -> CrudError {
    tracing::warn!(resource, action, %state, "invalid dialog transition");
    CrudError::InvalidTransition { action, state }
}
