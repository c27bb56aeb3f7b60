//! In-flight guard for user-triggered actions.

use logion_core::error::{LogionError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Allows at most one outstanding run of a named action.
#[derive(Debug, Clone)]
pub struct ActionGuard {
    action: &'static str,
    in_flight: Arc<AtomicBool>,
}

/// Held while the action runs; dropping it releases the guard, on success,
/// error or panic alike.
#[derive(Debug)]
pub struct ActionPermit {
    in_flight: Arc<AtomicBool>,
}

impl ActionGuard {
    pub fn new(action: &'static str) -> Self {
        Self {
            action,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claims the guard, or fails with `ActionInProgress` if a previous
    /// trigger has not completed.
    pub fn try_acquire(&self) -> Result<ActionPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| LogionError::ActionInProgress(self.action.to_string()))?;
        Ok(ActionPermit {
            in_flight: self.in_flight.clone(),
        })
    }
}

impl Drop for ActionPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected_while_held() {
        let guard = ActionGuard::new("connect");
        let permit = guard.try_acquire().unwrap();
        assert!(guard.is_in_flight());

        let err = guard.try_acquire().unwrap_err();
        assert!(err.is_action_in_progress());
        assert!(err.to_string().contains("connect"));

        drop(permit);
        assert!(!guard.is_in_flight());
        assert!(guard.try_acquire().is_ok());
    }

    #[test]
    fn test_guards_are_independent() {
        let add_file = ActionGuard::new("add-file");
        let add_record = ActionGuard::new("add-tokens-record");

        let _file = add_file.try_acquire().unwrap();
        assert!(add_record.try_acquire().is_ok());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let guard = ActionGuard::new("add-file");
        let clone = guard.clone();
        let _permit = guard.try_acquire().unwrap();
        assert!(clone.try_acquire().is_err());
    }
}
