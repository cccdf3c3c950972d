//! Shared robot state with atomic single-slot admission.
//!
//! [`RobotState`] is created once at startup, owned by the service via
//! `Arc`, and mutated only by the action executor. The *holding ⇔ held
//! object present* invariant is enforced structurally: there is no
//! separate holding flag, only `Option<ObjectInfo>`.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::action::{ObjectInfo, Position};

/// Mutable robot state guarded by a busy flag.
///
/// # Concurrency
///
/// - Admission is a single atomic compare-and-swap on the busy flag:
///   at most one [`BusyGuard`] exists at a time.
/// - Position and held-object reads/writes go through an inner
///   `RwLock`, so status snapshots never block on an executing action.
#[derive(Debug)]
pub struct RobotState {
    busy: AtomicBool,
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    position: Position,
    held: Option<ObjectInfo>,
}

impl RobotState {
    /// Creates a fresh state at the origin, holding nothing, idle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
            inner: RwLock::new(Inner {
                position: Position::ORIGIN,
                held: None,
            }),
        }
    }

    /// Attempts the IDLE → BUSY transition.
    ///
    /// Returns a [`BusyGuard`] on success; the guard releases the slot
    /// when dropped, so every exit path of the admitted action resets
    /// the busy flag. Returns `None` without touching state when an
    /// action is already executing.
    #[must_use]
    pub fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { state: self })
    }

    /// Returns `true` while an action is actively executing.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Records that the arm now holds `object`.
    pub async fn set_held(&self, object: ObjectInfo) {
        self.inner.write().await.held = Some(object);
    }

    /// Clears the held object, returning it if one was held.
    pub async fn take_held(&self) -> Option<ObjectInfo> {
        self.inner.write().await.held.take()
    }

    /// Returns a clone of the currently held object, if any.
    pub async fn held(&self) -> Option<ObjectInfo> {
        self.inner.read().await.held.clone()
    }

    /// Moves the arm to `position`.
    pub async fn set_position(&self, position: Position) {
        self.inner.write().await.position = position;
    }

    /// Returns the current arm position.
    pub async fn position(&self) -> Position {
        self.inner.read().await.position
    }

    /// Takes a consistent snapshot of all four status fields.
    pub async fn status(&self) -> RobotStatus {
        let inner = self.inner.read().await;
        RobotStatus {
            current_position: inner.position,
            is_holding_object: inner.held.is_some(),
            current_object: inner.held.clone(),
            is_busy: self.is_busy(),
        }
    }
}

impl Default for RobotState {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII token for the BUSY state.
///
/// Dropping the guard performs the BUSY → IDLE transition; holding it
/// across `.await` points keeps the slot reserved for the whole staged
/// execution.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    state: &'a RobotState,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.busy.store(false, Ordering::Release);
    }
}

/// Snapshot of the robot state returned by the status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RobotStatus {
    /// Current arm position.
    pub current_position: Position,
    /// Whether an object is currently held.
    pub is_holding_object: bool,
    /// The held object, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_object: Option<ObjectInfo>,
    /// Whether an action is executing right now.
    pub is_busy: bool,
}
