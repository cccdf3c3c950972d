//! Robot action data model: positions, targets, action requests, and
//! the execution result contract.
//!
//! These types double as wire types: the REST layer accepts a
//! [`RobotAction`] body verbatim and returns an [`ActionResult`], so
//! field names here are the public API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A point in the robot's 3D workspace. Immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Position {
    /// The home position `(0, 0, 0)`.
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// A named placement target, optionally carrying coordinates.
///
/// When `position` is absent the location is identified by name alone
/// (e.g. `"테이블"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    /// Location name.
    pub name: String,
    /// Optional 3D coordinates of the location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Location {
    /// Creates a location identified by name only.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
            description: None,
        }
    }
}

/// A manipulable object, optionally carrying its current coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ObjectInfo {
    /// Object name.
    pub name: String,
    /// Optional current 3D position of the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ObjectInfo {
    /// Creates an object identified by name only.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
            description: None,
        }
    }
}

/// Discrete action kinds the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Pick up an object and place it at a location (staged execution).
    PickAndPlace,
    /// Pick up an object.
    Pick,
    /// Place the currently held object at a location.
    Place,
    /// Move to a target position.
    Move,
    /// Return to the home position.
    Home,
}

impl ActionType {
    /// The wire name of this action kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PickAndPlace => "pick_and_place",
            Self::Pick => "pick",
            Self::Place => "place",
            Self::Move => "move",
            Self::Home => "home",
        }
    }
}

/// A single requested robot operation: a kind plus its targets.
///
/// Only the fields relevant to the kind are expected to be populated;
/// a missing required field is a validation failure, never a crash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RobotAction {
    /// The action kind to perform.
    pub action_type: ActionType,
    /// Target object (required for `pick` and `pick_and_place`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_object: Option<ObjectInfo>,
    /// Target location (required for `place` and `pick_and_place`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_location: Option<Location>,
    /// Target coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_position: Option<Position>,
    /// Open-ended extra parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_params: Option<HashMap<String, serde_json::Value>>,
}

impl RobotAction {
    /// Builds a `pick_and_place` action from an object and a location.
    #[must_use]
    pub fn pick_and_place(object: ObjectInfo, location: Location) -> Self {
        Self {
            action_type: ActionType::PickAndPlace,
            target_object: Some(object),
            target_location: Some(location),
            target_position: None,
            additional_params: None,
        }
    }
}

/// The sole return contract of action execution.
///
/// No action ever raises past this boundary: rejections, validation
/// failures, and internal faults all come back as `success = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActionResult {
    /// Whether the action completed successfully.
    pub success: bool,
    /// Human-readable result message.
    pub message: String,
    /// Optional structured details (object names, failure kind, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ActionResult {
    /// Creates a successful result with no details.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            details: None,
        }
    }

    /// Creates a successful result carrying structured details.
    #[must_use]
    pub fn ok_with(
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Discriminated failure taxonomy for action execution.
///
/// Internal to the executor: every variant is converted into a failure
/// [`ActionResult`] at the boundary, with the kind recorded under
/// `details.kind`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Admission denied: another action is already executing.
    #[error("Robot is busy executing another action")]
    Busy,

    /// A required field for the requested kind is missing.
    #[error("{0}")]
    Validation(String),

    /// The robot state does not allow this action (e.g. `place` with
    /// nothing held).
    #[error("{0}")]
    InvalidState(String),

    /// The action kind has no execution branch.
    #[error("Unsupported action type: {0}")]
    Unsupported(String),

    /// An internal fault occurred during execution.
    #[error("Error executing action: {0}")]
    Internal(String),
}

impl ActionError {
    /// Short machine-readable name of the failure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Busy => "busy",
            Self::Validation(_) => "validation",
            Self::InvalidState(_) => "invalid_state",
            Self::Unsupported(_) => "unsupported",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<ActionError> for ActionResult {
    fn from(err: ActionError) -> Self {
        let mut details = HashMap::new();
        details.insert(
            "kind".to_string(),
            serde_json::Value::String(err.kind().to_string()),
        );
        Self {
            success: false,
            message: err.to_string(),
            details: Some(details),
        }
    }
}
