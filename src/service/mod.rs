//! Service layer: business logic orchestration.
//!
//! [`ActionExecutor`] serializes and runs robot actions,
//! [`CommandInterpreter`] maps free text to intents, and
//! [`ChatService`] ties the two together for the conversational
//! endpoint.

pub mod chat;
pub mod executor;
pub mod interpreter;

pub use chat::{ChatReply, ChatService};
pub use executor::{ActionExecutor, Clock, TokioClock};
pub use interpreter::{CommandInterpreter, Intent, Matcher};
