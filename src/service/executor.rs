//! Action executor: validates and runs one robot action at a time.
//!
//! The executor is the only writer of [`RobotState`]. Admission is a
//! single compare-and-swap on the busy flag; the returned guard resets
//! it on every exit path, so a failed validation or an internal fault
//! can never leak a busy robot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::json;

use crate::domain::action::{ActionError, ActionResult, ActionType, Position, RobotAction};
use crate::domain::assets::{Artifact, AssetStore};
use crate::domain::registry::ConnectionRegistry;
use crate::domain::robot_state::RobotState;

/// Number of timed stages in a `pick_and_place` execution.
const STAGE_COUNT: u8 = 4;

/// Source of timed waits during staged execution.
///
/// Injecting the clock keeps staged execution deterministic in tests:
/// the production [`TokioClock`] sleeps on the tokio timer, test clocks
/// resolve immediately.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Completes after `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Production clock backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Executes robot actions against the shared state, emitting staged
/// frames through the connection registry.
///
/// Contract: [`execute`](Self::execute) never errors outward. Every
/// rejection, validation failure, and internal fault comes back as a
/// failure [`ActionResult`].
#[derive(Debug)]
pub struct ActionExecutor {
    state: Arc<RobotState>,
    registry: Arc<ConnectionRegistry>,
    assets: Arc<AssetStore>,
    clock: Arc<dyn Clock>,
    stage_delay: Duration,
}

impl ActionExecutor {
    /// Creates an executor over the given collaborators.
    #[must_use]
    pub fn new(
        state: Arc<RobotState>,
        registry: Arc<ConnectionRegistry>,
        assets: Arc<AssetStore>,
        clock: Arc<dyn Clock>,
        stage_delay: Duration,
    ) -> Self {
        Self {
            state,
            registry,
            assets,
            clock,
            stage_delay,
        }
    }

    /// Runs a single action to completion.
    ///
    /// If another action is already executing, returns the busy failure
    /// immediately without touching state: no queueing, no blocking
    /// wait. Otherwise the IDLE → BUSY transition is taken atomically
    /// and held for the whole execution, including all staged waits.
    pub async fn execute(&self, action: &RobotAction) -> ActionResult {
        tracing::info!(action = action.action_type.as_str(), "executing action");

        let Some(_guard) = self.state.try_begin() else {
            return ActionError::Busy.into();
        };

        match self.run(action).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(error = %err, kind = err.kind(), "action failed");
                err.into()
            }
        }
        // _guard drops here: BUSY → IDLE on every path.
    }

    async fn run(&self, action: &RobotAction) -> Result<ActionResult, ActionError> {
        match action.action_type {
            ActionType::PickAndPlace => self.pick_and_place(action).await,
            ActionType::Pick => self.pick(action).await,
            ActionType::Place => self.place(action).await,
            ActionType::Home => self.home().await,
            ActionType::Move => Err(ActionError::Unsupported(
                ActionType::Move.as_str().to_string(),
            )),
        }
    }

    /// Staged execution: four timed steps, each broadcasting its frame
    /// to all stream subscribers when the artifact exists.
    async fn pick_and_place(&self, action: &RobotAction) -> Result<ActionResult, ActionError> {
        let (Some(object), Some(location)) = (&action.target_object, &action.target_location)
        else {
            return Err(ActionError::Validation(
                "Both target object and location are required for PICK_AND_PLACE action"
                    .to_string(),
            ));
        };

        for step in 1..=STAGE_COUNT {
            self.clock.sleep(self.stage_delay).await;

            match self.assets.load(Artifact::Stage(step)).await {
                Some(frame) => {
                    tracing::info!(step, "broadcasting stage frame");
                    self.registry.broadcast(&frame).await;
                }
                // Missing frames are tolerated: the stage still counts.
                None => tracing::warn!(step, "stage frame missing, skipping broadcast"),
            }
        }

        Ok(ActionResult::ok(format!(
            "Successfully moved {} to {}",
            object.name, location.name
        )))
    }

    async fn pick(&self, action: &RobotAction) -> Result<ActionResult, ActionError> {
        let Some(object) = &action.target_object else {
            return Err(ActionError::Validation(
                "Target object is required for PICK action".to_string(),
            ));
        };

        self.state.set_held(object.clone()).await;

        let details = HashMap::from([("object_name".to_string(), json!(object.name))]);
        Ok(ActionResult::ok_with(
            format!("Successfully picked up {}", object.name),
            details,
        ))
    }

    async fn place(&self, action: &RobotAction) -> Result<ActionResult, ActionError> {
        // The held check comes before location validation, matching the
        // user-visible behavior of the arm: an empty gripper is the
        // first thing it notices.
        let Some(held) = self.state.held().await else {
            return Err(ActionError::InvalidState(
                "No object is currently held".to_string(),
            ));
        };
        let Some(location) = &action.target_location else {
            return Err(ActionError::Validation(
                "Target location is required for PLACE action".to_string(),
            ));
        };

        let _ = self.state.take_held().await;

        let details = HashMap::from([
            ("object_name".to_string(), json!(held.name)),
            ("location".to_string(), json!(location.name)),
        ]);
        Ok(ActionResult::ok_with(
            format!("Successfully placed {} on {}", held.name, location.name),
            details,
        ))
    }

    async fn home(&self) -> Result<ActionResult, ActionError> {
        self.state.set_position(Position::ORIGIN).await;
        Ok(ActionResult::ok("Successfully returned to home position"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::action::{Location, ObjectInfo};

    /// Clock whose waits resolve immediately.
    #[derive(Debug)]
    struct NullClock;

    impl Clock for NullClock {
        fn sleep(&self, _duration: Duration) -> BoxFuture<'static, ()> {
            Box::pin(std::future::ready(()))
        }
    }

    struct Fixture {
        executor: ActionExecutor,
        state: Arc<RobotState>,
        registry: Arc<ConnectionRegistry>,
        _dir: tempfile::TempDir,
    }

    fn fixture_with(stage_frames: &[u8]) -> Fixture {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        for step in stage_frames {
            let path = dir.path().join(format!("robot_action_{step}.png"));
            if std::fs::write(&path, [*step]).is_err() {
                panic!("fixture write failed");
            }
        }

        let assets = Arc::new(AssetStore::new(dir.path()));
        let state = Arc::new(RobotState::new());
        let registry = Arc::new(ConnectionRegistry::new(Arc::clone(&assets), 8));
        let executor = ActionExecutor::new(
            Arc::clone(&state),
            Arc::clone(&registry),
            assets,
            Arc::new(NullClock),
            Duration::from_secs(5),
        );
        Fixture {
            executor,
            state,
            registry,
            _dir: dir,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(&[])
    }

    fn pick(name: &str) -> RobotAction {
        RobotAction {
            action_type: ActionType::Pick,
            target_object: Some(ObjectInfo::named(name)),
            target_location: None,
            target_position: None,
            additional_params: None,
        }
    }

    fn place(location: &str) -> RobotAction {
        RobotAction {
            action_type: ActionType::Place,
            target_object: None,
            target_location: Some(Location::named(location)),
            target_position: None,
            additional_params: None,
        }
    }

    fn bare(action_type: ActionType) -> RobotAction {
        RobotAction {
            action_type,
            target_object: None,
            target_location: None,
            target_position: None,
            additional_params: None,
        }
    }

    #[tokio::test]
    async fn busy_rejection_leaves_state_untouched() {
        let f = fixture();
        let guard = f.state.try_begin();
        assert!(guard.is_some());

        for action in [
            RobotAction::pick_and_place(ObjectInfo::named("사과"), Location::named("테이블")),
            pick("사과"),
            place("테이블"),
            bare(ActionType::Home),
            bare(ActionType::Move),
        ] {
            let result = f.executor.execute(&action).await;
            assert!(!result.success);
            assert_eq!(result.message, "Robot is busy executing another action");
        }

        drop(guard);
        let status = f.state.status().await;
        assert_eq!(status.current_position, Position::ORIGIN);
        assert!(!status.is_holding_object);
        assert!(!status.is_busy);
    }

    #[tokio::test]
    async fn place_with_nothing_held_fails_without_mutation() {
        let f = fixture();
        let result = f.executor.execute(&place("테이블")).await;

        assert!(!result.success);
        assert_eq!(result.message, "No object is currently held");

        let status = f.state.status().await;
        assert!(!status.is_holding_object);
        assert!(status.current_object.is_none());
    }

    #[tokio::test]
    async fn pick_then_place_round_trip() {
        let f = fixture();

        let result = f.executor.execute(&pick("사과")).await;
        assert!(result.success);
        let status = f.state.status().await;
        assert!(status.is_holding_object);
        assert_eq!(
            status.current_object.map(|o| o.name),
            Some("사과".to_string())
        );

        let result = f.executor.execute(&place("테이블")).await;
        assert!(result.success);
        let Some(details) = result.details else {
            panic!("expected details");
        };
        assert_eq!(details.get("object_name"), Some(&json!("사과")));
        assert_eq!(details.get("location"), Some(&json!("테이블")));

        let status = f.state.status().await;
        assert!(!status.is_holding_object);
        assert!(status.current_object.is_none());
    }

    #[tokio::test]
    async fn home_resets_position_from_anywhere() {
        let f = fixture();
        f.state
            .set_position(Position {
                x: 1.5,
                y: -2.0,
                z: 0.75,
            })
            .await;

        let result = f.executor.execute(&bare(ActionType::Home)).await;
        assert!(result.success);
        assert_eq!(f.state.position().await, Position::ORIGIN);
    }

    #[tokio::test]
    async fn busy_is_cleared_after_every_outcome() {
        let f = fixture();

        // Success path.
        let _ = f.executor.execute(&bare(ActionType::Home)).await;
        assert!(!f.state.is_busy());

        // Validation failure path.
        let _ = f.executor.execute(&bare(ActionType::Pick)).await;
        assert!(!f.state.is_busy());

        // Invalid-state failure path.
        let _ = f.executor.execute(&place("테이블")).await;
        assert!(!f.state.is_busy());

        // Unsupported-kind path.
        let _ = f.executor.execute(&bare(ActionType::Move)).await;
        assert!(!f.state.is_busy());
    }

    #[tokio::test]
    async fn move_is_rejected_as_unsupported() {
        let f = fixture();
        let result = f.executor.execute(&bare(ActionType::Move)).await;
        assert!(!result.success);
        assert_eq!(result.message, "Unsupported action type: move");
    }

    #[tokio::test]
    async fn pick_and_place_requires_both_targets() {
        let f = fixture();
        let result = f.executor.execute(&bare(ActionType::PickAndPlace)).await;
        assert!(!result.success);
        assert_eq!(
            result.message,
            "Both target object and location are required for PICK_AND_PLACE action"
        );
    }

    #[tokio::test]
    async fn pick_and_place_broadcasts_available_stage_frames() {
        // Only stages 1 and 3 have artifacts: the other two are skipped.
        let f = fixture_with(&[1, 3]);
        let (_id, mut rx) = f.registry.register().await;

        let action =
            RobotAction::pick_and_place(ObjectInfo::named("사과"), Location::named("테이블"));
        let result = f.executor.execute(&action).await;

        assert!(result.success);
        assert_eq!(result.message, "Successfully moved 사과 to 테이블");

        assert_eq!(rx.try_recv().ok(), Some(vec![1]));
        assert_eq!(rx.try_recv().ok(), Some(vec![3]));
        assert!(rx.try_recv().is_err());
    }
}
