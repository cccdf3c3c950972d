//! Domain layer: robot data model, shared state, stream registry, and
//! the asset source.
//!
//! This module contains the server-side domain model including the
//! action/result contract, the singleton robot state with its busy
//! guard, the connection registry for frame fan-out, and the optional
//! image artifact store.

pub mod action;
pub mod assets;
pub mod registry;
pub mod robot_state;
pub mod subscriber_id;

pub use action::{
    ActionError, ActionResult, ActionType, Location, ObjectInfo, Position, RobotAction,
};
pub use assets::{Artifact, AssetStore};
pub use registry::ConnectionRegistry;
pub use robot_state::{BusyGuard, RobotState, RobotStatus};
pub use subscriber_id::SubscriberId;
