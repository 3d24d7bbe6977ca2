//! Action registry with collision checks
//!
//! Resources sharing one dispatch namespace register here. The registry
//! rejects titles that cannot namespace identifiers and titles already
//! claimed by a different schema, and hands out a stable [`ActionToken`] per
//! `(resource, operation, phase)` so a dispatcher can route an incoming
//! identifier back to its key.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

use super::{generate_action_set, ActionSet, Operation, Phase};
use crate::config::ActionSettings;
use crate::error::{CrudError, Result};
use crate::schema::Schema;

/// Identifiers per resource: every operation in every phase
#[allow(clippy::cast_possible_truncation)]
const ACTIONS_PER_RESOURCE: u32 = (Operation::ALL.len() * Phase::ALL.len()) as u32;

/// Opaque, stable handle of one registered identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionToken(u32);

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

/// Structured key of a registered identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionKey {
    /// Resource title
    pub resource: String,
    /// Operation
    pub operation: Operation,
    /// Lifecycle phase
    pub phase: Phase,
}

#[derive(Debug)]
struct Registration {
    schema: Schema,
    actions: ActionSet,
    base: u32,
}

/// Registry of resource action sets
#[derive(Debug, Default)]
pub struct ActionRegistry {
    settings: ActionSettings,
    resources: IndexMap<String, Registration>,
    by_identifier: HashMap<String, (ActionKey, ActionToken)>,
}

impl ActionRegistry {
    /// Create an empty registry with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with explicit settings
    #[must_use]
    pub fn with_settings(settings: ActionSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Register a resource and return its action set
    ///
    /// Registering the same title again with an equal schema returns the
    /// existing set. A different schema under a claimed title is an
    /// [`CrudError::ActionCollision`] unless strict registration is off, in
    /// which case the new schema replaces the old one and the identifiers
    /// and tokens stay the same.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use acton_crud::actions::{ActionRegistry, Operation, Phase};
    /// use acton_crud::schema::{PropertySchema, Schema};
    ///
    /// let mut registry = ActionRegistry::new();
    /// let widget = Schema::new("Widget");
    /// registry.register(&widget).unwrap();
    /// registry.register(&widget).unwrap();
    ///
    /// let other = Schema::new("Widget").property("id", PropertySchema::new("integer"));
    /// assert!(registry.register(&other).is_err());
    ///
    /// let (key, _token) = registry.lookup("Widget/update/failed").unwrap();
    /// assert_eq!((key.operation, key.phase), (Operation::Update, Phase::Failed));
    /// ```
    pub fn register(&mut self, schema: &Schema) -> Result<&ActionSet> {
        validate_title(&schema.title)?;
        let title = schema.title.clone();

        if self.resources.contains_key(&title) {
            let strict = self.settings.strict_registration;
            let existing = &mut self.resources[&title];
            if existing.schema != *schema {
                if strict {
                    tracing::warn!(resource = %title, "action namespace collision");
                    return Err(CrudError::ActionCollision(title));
                }
                tracing::debug!(resource = %title, "replacing schema of registered resource");
                existing.schema = schema.clone();
            }
            return Ok(&existing.actions);
        }

        let base = reserve_base(self.resources.len())
            .ok_or_else(|| CrudError::Config("action registry is full".into()))?;
        let actions = generate_action_set(schema);

        for (operation, phase, identifier) in actions.iter() {
            let key = ActionKey {
                resource: title.clone(),
                operation,
                phase,
            };
            let token = ActionToken(base + offset(operation, phase));
            self.by_identifier
                .insert(identifier.to_string(), (key, token));
        }

        tracing::debug!(resource = %title, base, "registered resource actions");
        let registration = self.resources.entry(title).or_insert(Registration {
            schema: schema.clone(),
            actions,
            base,
        });
        Ok(&registration.actions)
    }

    /// Action set of a registered resource
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&ActionSet> {
        self.resources.get(title).map(|r| &r.actions)
    }

    /// Token of a registered `(resource, operation, phase)`
    #[must_use]
    pub fn token(&self, title: &str, operation: Operation, phase: Phase) -> Option<ActionToken> {
        self.resources
            .get(title)
            .map(|r| ActionToken(r.base + offset(operation, phase)))
    }

    /// Resolve an identifier to its key and token
    #[must_use]
    pub fn lookup(&self, identifier: &str) -> Option<(&ActionKey, ActionToken)> {
        self.by_identifier
            .get(identifier)
            .map(|(key, token)| (key, *token))
    }

    /// Registered resource titles, in registration order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Number of registered resources
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[allow(clippy::cast_possible_truncation)] // both positions are < 5
/// First token of the resource at `index`, if all of its tokens fit in a `u32`
fn reserve_base(index: usize) -> Option<u32> {
    let base = u32::try_from(index).ok()?.checked_mul(ACTIONS_PER_RESOURCE)?;
    base.checked_add(ACTIONS_PER_RESOURCE - 1)?;
    Some(base)
}

#[allow(clippy::cast_possible_truncation)]
const fn offset(operation: Operation, phase: Phase) -> u32 {
    (operation.position() * Phase::ALL.len() + phase.position()) as u32
}

fn validate_title(title: &str) -> Result<()> {
    let reason = if title.trim().is_empty() {
        "title is empty"
    } else if title.contains('/') {
        "title contains '/', the identifier separator"
    } else {
        return Ok(());
    };
    tracing::warn!(%title, reason, "rejected resource title");
    Err(CrudError::InvalidResourceTitle {
        title: title.to_string(),
        reason,
    })
}
