//! WebSocket layer: the live robot stream.
//!
//! The endpoint at `/ws/robot-stream` is push-only: the server sends
//! unsolicited binary frames produced by broadcasts, starting with the
//! catch-up status frame when one exists. Inbound text is treated as a
//! keep-alive no-op.

pub mod connection;
pub mod handler;
