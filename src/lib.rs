//! # clara-gateway
//!
//! REST API and WebSocket gateway for a mock robotic-arm control
//! service. Actions are discrete commands executed one at a time;
//! progress frames fan out to stream observers; a chat-completion
//! front-end maps free text to the same actions.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── ChatService + CommandInterpreter (service/)
//!     ├── ActionExecutor (service/)
//!     │
//!     ├── RobotState (domain/)
//!     ├── ConnectionRegistry (domain/)
//!     └── AssetStore (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
