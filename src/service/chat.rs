//! Chat service: turns interpreted intents into replies and side
//! effects.
//!
//! The interpreter itself is pure; this service owns the collaborators
//! that intents act on — the action executor for dispatched commands
//! and the connection registry plus asset store for the status
//! broadcast behind a location query.

use std::sync::Arc;

use crate::domain::assets::{Artifact, AssetStore};
use crate::domain::registry::ConnectionRegistry;
use crate::service::executor::ActionExecutor;
use crate::service::interpreter::{CommandInterpreter, Intent};

/// Outcome of interpreting one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Assistant reply text.
    pub content: String,
    /// Whether the client should open (or surface) the live stream.
    pub show_stream: bool,
    /// Locator of the live stream, present when `show_stream` is set.
    pub stream_url: Option<String>,
}

impl ChatReply {
    fn plain(content: String) -> Self {
        Self {
            content,
            show_stream: false,
            stream_url: None,
        }
    }
}

/// Orchestrates the natural-language front-end.
#[derive(Debug)]
pub struct ChatService {
    interpreter: CommandInterpreter,
    executor: Arc<ActionExecutor>,
    registry: Arc<ConnectionRegistry>,
    assets: Arc<AssetStore>,
    stream_url: String,
}

impl ChatService {
    /// Creates the service over the given collaborators. `stream_url`
    /// is the advertised locator of the live stream endpoint.
    #[must_use]
    pub fn new(
        executor: Arc<ActionExecutor>,
        registry: Arc<ConnectionRegistry>,
        assets: Arc<AssetStore>,
        stream_url: String,
    ) -> Self {
        Self {
            interpreter: CommandInterpreter::new(),
            executor,
            registry,
            assets,
            stream_url,
        }
    }

    /// Interprets one message and performs its side effects.
    ///
    /// A dispatched action runs to full completion before the reply is
    /// produced; a location query broadcasts the current status frame
    /// (when available) to every stream subscriber.
    pub async fn respond(&self, text: &str) -> ChatReply {
        tracing::info!(message = text, "interpreting chat message");

        match self.interpreter.interpret(text) {
            Intent::Reply(content) => ChatReply::plain(content),
            Intent::ShowStream { reply } => {
                if let Some(frame) = self.assets.load(Artifact::Status).await {
                    let delivered = self.registry.broadcast(&frame).await;
                    tracing::info!(delivered, "status frame broadcast");
                }
                ChatReply {
                    content: reply,
                    show_stream: true,
                    stream_url: Some(self.stream_url.clone()),
                }
            }
            Intent::Dispatch(action) => {
                let result = self.executor.execute(&action).await;
                ChatReply::plain(result.message)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::robot_state::RobotState;
    use crate::service::executor::Clock;
    use futures_util::future::BoxFuture;
    use std::time::Duration;

    #[derive(Debug)]
    struct NullClock;

    impl Clock for NullClock {
        fn sleep(&self, _duration: Duration) -> BoxFuture<'static, ()> {
            Box::pin(std::future::ready(()))
        }
    }

    fn service_with_status(frame: Option<&[u8]>) -> (ChatService, tempfile::TempDir) {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        if let Some(frame) = frame {
            let path = dir.path().join("robot_screenshot.png");
            if std::fs::write(&path, frame).is_err() {
                panic!("fixture write failed");
            }
        }

        let assets = Arc::new(AssetStore::new(dir.path()));
        let state = Arc::new(RobotState::new());
        let registry = Arc::new(ConnectionRegistry::new(Arc::clone(&assets), 8));
        let executor = Arc::new(ActionExecutor::new(
            state,
            Arc::clone(&registry),
            Arc::clone(&assets),
            Arc::new(NullClock),
            Duration::from_secs(5),
        ));
        let service = ChatService::new(
            executor,
            registry,
            assets,
            "ws://localhost:8002/ws/robot-stream".to_string(),
        );
        (service, dir)
    }

    #[tokio::test]
    async fn canned_reply_has_no_side_effects() {
        let (service, _dir) = service_with_status(None);
        let reply = service.respond("안녕하세요").await;
        assert!(!reply.show_stream);
        assert!(reply.stream_url.is_none());
        assert_eq!(reply.content, "안녕하세요! 무엇을 도와드릴까요?");
    }

    #[tokio::test]
    async fn location_query_broadcasts_status_and_references_stream() {
        let (service, _dir) = service_with_status(Some(b"status-frame"));
        let (_id, mut rx) = service.registry.register().await;
        // Drain the catch-up frame delivered at registration.
        let _ = rx.try_recv();

        let reply = service.respond("지금 어디야?").await;
        assert!(reply.show_stream);
        assert_eq!(
            reply.stream_url.as_deref(),
            Some("ws://localhost:8002/ws/robot-stream")
        );
        assert_eq!(rx.try_recv().ok(), Some(b"status-frame".to_vec()));
    }

    #[tokio::test]
    async fn location_query_without_artifact_still_replies() {
        let (service, _dir) = service_with_status(None);
        let reply = service.respond("어디야?").await;
        assert!(reply.show_stream);
        assert!(reply.stream_url.is_some());
    }

    #[tokio::test]
    async fn move_command_dispatches_and_reports_result() {
        let (service, _dir) = service_with_status(None);
        let reply = service.respond("사과를 테이블 위로 옮겨줘").await;
        assert!(!reply.show_stream);
        assert_eq!(reply.content, "Successfully moved 사과 to 테이블");
    }
}
