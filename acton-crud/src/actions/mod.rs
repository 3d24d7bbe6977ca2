//! CRUD lifecycle actions
//!
//! Every resource gets the same grid of action identifiers: five operations
//! ([`Operation`]) times five lifecycle phases ([`Phase`]), spelled
//! `"{title}/{operation}/{phase}"`. A host can wire one generic lifecycle
//! dispatcher for all resources because every set always holds all 25.
//!
//! ```rust
//! use acton_crud::actions::{generate_action_set, Operation, Phase};
//! use acton_crud::schema::Schema;
//! use serde_json::json;
//!
//! let actions = generate_action_set(&Schema::new("Widget"));
//! assert_eq!(
//!     actions.identifier(Operation::Create, Phase::Succeeded),
//!     "Widget/create/succeeded"
//! );
//!
//! let action = actions
//!     .creator(Operation::Create, Phase::Succeeded)
//!     .create(json!({ "id": 1 }));
//! assert_eq!(action.action_type, "Widget/create/succeeded");
//! assert_eq!(action.payload, json!({ "id": 1 }));
//! ```
//!
//! [`generate_action_set`] does not detect title collisions between
//! resources; use [`ActionRegistry`] for that.

pub mod registry;

pub use registry::{ActionKey, ActionRegistry, ActionToken};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::schema::Schema;

/// CRUD operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// List a page of items
    Index,
    /// Fetch one item
    Show,
    /// Create an item
    Create,
    /// Update an item
    Update,
    /// Delete an item
    Destroy,
}

impl Operation {
    /// All operations, in identifier order
    pub const ALL: [Self; 5] = [
        Self::Index,
        Self::Show,
        Self::Create,
        Self::Update,
        Self::Destroy,
    ];

    /// Get the operation name used in identifiers
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Show => "show",
            Self::Create => "create",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }

    const fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operation '{s}'"))
    }
}

/// Lifecycle phase of an asynchronous operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Operation requested
    Start,
    /// Operation in flight
    Started,
    /// Operation failed
    Failed,
    /// Operation succeeded
    Succeeded,
    /// Operation finished, either way
    Completed,
}

impl Phase {
    /// All phases, in identifier order
    pub const ALL: [Self; 5] = [
        Self::Start,
        Self::Started,
        Self::Failed,
        Self::Succeeded,
        Self::Completed,
    ];

    /// Get the phase name used in identifiers
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Started => "started",
            Self::Failed => "failed",
            Self::Succeeded => "succeeded",
            Self::Completed => "completed",
        }
    }

    const fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| format!("unknown phase '{s}'"))
    }
}

/// A dispatched action: identifier plus payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action identifier
    #[serde(rename = "type")]
    pub action_type: String,
    /// Caller payload, passed through untouched
    pub payload: Value,
}

/// Builds actions of one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCreator {
    action_type: String,
}

impl ActionCreator {
    /// Identifier this creator stamps on its actions
    #[must_use]
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Wrap a payload into an action
    #[must_use]
    pub fn create(&self, payload: impl Into<Value>) -> Action {
        Action {
            action_type: self.action_type.clone(),
            payload: payload.into(),
        }
    }
}

/// All 25 lifecycle identifiers of one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet {
    title: String,
    identifiers: [[String; 5]; 5],
}

impl ActionSet {
    /// Resource title the identifiers are namespaced under
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Identifier of one (operation, phase) pair
    #[must_use]
    pub fn identifier(&self, operation: Operation, phase: Phase) -> &str {
        &self.identifiers[operation.position()][phase.position()]
    }

    /// Creator of one (operation, phase) pair
    #[must_use]
    pub fn creator(&self, operation: Operation, phase: Phase) -> ActionCreator {
        ActionCreator {
            action_type: self.identifier(operation, phase).to_string(),
        }
    }

    /// Shorthand for `creator(operation, phase).create(payload)`
    #[must_use]
    pub fn create(&self, operation: Operation, phase: Phase, payload: impl Into<Value>) -> Action {
        self.creator(operation, phase).create(payload)
    }

    /// Iterate every identifier with its key
    pub fn iter(&self) -> impl Iterator<Item = (Operation, Phase, &str)> + '_ {
        Operation::ALL.into_iter().flat_map(move |operation| {
            Phase::ALL
                .into_iter()
                .map(move |phase| (operation, phase, self.identifier(operation, phase)))
        })
    }

    /// Two-level `{ operation: { phase: identifier } }` mapping
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut operations = Map::new();
        for operation in Operation::ALL {
            let phases: Map<String, Value> = Phase::ALL
                .into_iter()
                .map(|phase| {
                    (
                        phase.as_str().to_string(),
                        Value::String(self.identifier(operation, phase).to_string()),
                    )
                })
                .collect();
            operations.insert(operation.as_str().to_string(), Value::Object(phases));
        }
        Value::Object(operations)
    }
}

/// Build the lifecycle identifiers of a resource
///
/// Pure and idempotent: the same title always yields identical identifiers.
#[must_use]
pub fn generate_action_set(schema: &Schema) -> ActionSet {
    let title = schema.title.as_str();
    let identifiers = Operation::ALL.map(|operation| {
        Phase::ALL.map(|phase| format!("{title}/{operation}/{phase}"))
    });
    ActionSet {
        title: title.to_string(),
        identifiers,
    }
}
