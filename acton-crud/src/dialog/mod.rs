//! Dialog state and the caller's CRUD callbacks
//!
//! A resource table shows at most one modal at a time. [`DialogState`]
//! records which one and with which item; the pair is only ever replaced as
//! a whole, so kind and item cannot drift apart.
//!
//! Committed dialogs are delegated to a [`ResourceHandler`] supplied by the
//! host. Callbacks are fire-and-forget: the table does not wait for them and
//! does not observe whether they succeed.

use std::fmt;

use crate::schema::Item;

/// Which modal is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialogKind {
    /// No modal
    #[default]
    Hidden,
    /// Create form
    New,
    /// Edit form
    Edit,
    /// Destroy confirmation
    Destroy,
}

impl DialogKind {
    /// Get the kind name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hidden => "Hidden",
            Self::New => "New",
            Self::Edit => "Edit",
            Self::Destroy => "Destroy",
        }
    }

    /// Check whether a form (create or edit) is open
    #[must_use]
    pub const fn has_form(&self) -> bool {
        matches!(self, Self::New | Self::Edit)
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open modal and the item it was opened with
///
/// The item is empty for [`DialogKind::Hidden`] and [`DialogKind::New`].
/// For edit it is the original record, not the form's working copy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DialogState {
    kind: DialogKind,
    item: Item,
}

impl DialogState {
    /// No modal open
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Create form open
    #[must_use]
    pub fn creating() -> Self {
        Self {
            kind: DialogKind::New,
            item: Item::new(),
        }
    }

    /// Edit form open on a record
    #[must_use]
    pub const fn editing(item: Item) -> Self {
        Self {
            kind: DialogKind::Edit,
            item,
        }
    }

    /// Destroy confirmation open on a record
    #[must_use]
    pub const fn destroying(item: Item) -> Self {
        Self {
            kind: DialogKind::Destroy,
            item,
        }
    }

    /// Open modal
    #[must_use]
    pub const fn kind(&self) -> DialogKind {
        self.kind
    }

    /// Item the modal was opened with
    #[must_use]
    pub const fn item(&self) -> &Item {
        &self.item
    }

    /// Check whether no modal is open
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self.kind, DialogKind::Hidden)
    }

    /// Split into kind and item
    #[must_use]
    pub fn into_parts(self) -> (DialogKind, Item) {
        (self.kind, self.item)
    }
}

/// Caller-owned CRUD callbacks
///
/// The table calls exactly one of these per committed dialog or page change.
/// Their own concurrency (e.g. spawning a request) is opaque to the table.
#[cfg_attr(test, mockall::automock)]
pub trait ResourceHandler {
    /// A create form was submitted
    fn on_create(&mut self, item: Item);

    /// An edit form was submitted with its working copy
    fn on_update(&mut self, item: Item);

    /// A destroy confirmation was accepted for the selected record
    fn on_destroy(&mut self, item: Item);

    /// The user picked another page
    fn on_page_change(&mut self, page: usize, per_page: usize);
}

type ItemCallback = Box<dyn FnMut(Item)>;
type PageCallback = Box<dyn FnMut(usize, usize)>;

/// Closure-backed [`ResourceHandler`]; unset callbacks do nothing
///
/// # Examples
///
/// ```rust
/// use acton_crud::dialog::{Callbacks, ResourceHandler};
/// use acton_crud::schema::Item;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let created = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&created);
/// let mut callbacks = Callbacks::new().with_create(move |item| sink.borrow_mut().push(item));
///
/// callbacks.on_create(Item::new().with_field("name", "Ann"));
/// callbacks.on_destroy(Item::new());
/// assert_eq!(created.borrow().len(), 1);
/// ```
#[derive(Default)]
pub struct Callbacks {
    create: Option<ItemCallback>,
    update: Option<ItemCallback>,
    destroy: Option<ItemCallback>,
    page_change: Option<PageCallback>,
}

impl Callbacks {
    /// Create callbacks that do nothing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the create callback
    #[must_use]
    pub fn with_create(mut self, f: impl FnMut(Item) + 'static) -> Self {
        self.create = Some(Box::new(f));
        self
    }

    /// Set the update callback
    #[must_use]
    pub fn with_update(mut self, f: impl FnMut(Item) + 'static) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    /// Set the destroy callback
    #[must_use]
    pub fn with_destroy(mut self, f: impl FnMut(Item) + 'static) -> Self {
        self.destroy = Some(Box::new(f));
        self
    }

    /// Set the page change callback
    #[must_use]
    pub fn with_page_change(mut self, f: impl FnMut(usize, usize) + 'static) -> Self {
        self.page_change = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("create", &self.create.is_some())
            .field("update", &self.update.is_some())
            .field("destroy", &self.destroy.is_some())
            .field("page_change", &self.page_change.is_some())
            .finish()
    }
}

impl ResourceHandler for Callbacks {
    fn on_create(&mut self, item: Item) {
        if let Some(f) = self.create.as_mut() {
            f(item);
        }
    }

    fn on_update(&mut self, item: Item) {
        if let Some(f) = self.update.as_mut() {
            f(item);
        }
    }

    fn on_destroy(&mut self, item: Item) {
        if let Some(f) = self.destroy.as_mut() {
            f(item);
        }
    }

    fn on_page_change(&mut self, page: usize, per_page: usize) {
        if let Some(f) = self.page_change.as_mut() {
            f(page, per_page);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_initial_state_is_hidden_and_empty() {
        let state = DialogState::default();
        assert!(state.is_hidden());
        assert!(state.item().is_empty());
    }

    #[test]
    fn test_constructors_pair_kind_and_item() {
        let record = Item::from_value(json!({ "id": 7 })).unwrap();

        assert_eq!(DialogState::creating().kind(), DialogKind::New);
        assert!(DialogState::creating().item().is_empty());

        let (kind, item) = DialogState::destroying(record.clone()).into_parts();
        assert_eq!(kind, DialogKind::Destroy);
        assert_eq!(item, record);

        assert_eq!(DialogState::editing(record.clone()).item(), &record);
    }

    #[test]
    fn test_has_form() {
        assert!(DialogKind::New.has_form());
        assert!(DialogKind::Edit.has_form());
        assert!(!DialogKind::Destroy.has_form());
        assert!(!DialogKind::Hidden.has_form());
    }

    #[test]
    fn test_callbacks_forward_to_closures() {
        let pages = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pages);
        let mut callbacks = Callbacks::new()
            .with_page_change(move |page, per_page| sink.borrow_mut().push((page, per_page)));

        callbacks.on_page_change(3, 25);
        callbacks.on_create(Item::new());
        callbacks.on_update(Item::new());

        assert_eq!(*pages.borrow(), vec![(3, 25)]);
        assert!(format!("{callbacks:?}").contains("page_change: true"));
    }

    #[test]
    fn test_callbacks_dispatch_with_method_syntax() {
        let created = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&created);
        let mut callbacks = Callbacks::new().with_create(move |item| sink.borrow_mut().push(item));

        callbacks.on_create(Item::new().with_field("name", "Ann"));
        callbacks.on_destroy(Item::new());

        let created = created.borrow();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].get("name"), Some(&json!("Ann")));
    }
}
