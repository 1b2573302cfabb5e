// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mount lifecycle shared by every state machine.
//!
//! A machine is created idle, runs between `start()` and `stop()`, and may be
//! started again after a stop. Updates delivered while the machine is not
//! running are ignored, so a late frame or timer callback can never mutate a
//! torn-down instance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Identifier of one mount of a view.
///
/// A fresh id is issued on every mount, so two mounts of the same view never
/// share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MountId(pub Uuid);

impl MountId {
    /// Create a new random mount ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Created, never started
    #[default]
    Idle,
    /// Started and receiving updates
    Running,
    /// Torn down; updates are no-ops until restarted
    Stopped,
}

impl Lifecycle {
    /// Whether updates should be applied
    pub fn is_running(&self) -> bool {
        matches!(self, Lifecycle::Running)
    }

    /// Transition to running. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        *self = Lifecycle::Running;
        true
    }

    /// Transition to stopped. Returns false if there was nothing to stop.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        *self = Lifecycle::Stopped;
        true
    }
}

/// Common surface of the timed state machines.
///
/// The host calls [`Motion::update`] with the wall-clock time elapsed since the
/// previous call; the return value tells it whether a redraw is needed.
pub trait Motion {
    /// Begin (or restart) the machine from its initial state.
    fn start(&mut self);

    /// Cancel all pending timers. Idempotent.
    fn stop(&mut self);

    /// Advance the machine's clock by `dt`. Returns true if visible state changed.
    fn update(&mut self, dt: Duration) -> bool;

    /// Whether the machine is currently mounted and running.
    fn is_running(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_stop_idempotent() {
        let mut lifecycle = Lifecycle::default();
        assert!(!lifecycle.is_running());
        assert!(!lifecycle.stop());

        assert!(lifecycle.start());
        assert!(!lifecycle.start());
        assert!(lifecycle.is_running());

        assert!(lifecycle.stop());
        assert!(!lifecycle.stop());
        assert_eq!(lifecycle, Lifecycle::Stopped);

        // Restartable after teardown
        assert!(lifecycle.start());
    }

    #[test]
    fn test_mount_ids_are_unique() {
        assert_ne!(MountId::new(), MountId::new());
    }
}
