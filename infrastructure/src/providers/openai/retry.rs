//! Retry state machine for scoring calls
//!
//! The machine is independent of the HTTP transport: the gateway reports
//! whether a failure was transient and the machine answers with the next
//! move. Transient failures are retried with linear backoff on the current
//! model, then once more through the backup model; anything else fails
//! immediately.

use std::time::Duration;

/// Next move after a failed scoring call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDirective {
    /// Try the same model again after the delay
    RetryAfter(Duration),
    /// Move remaining attempts to the backup model
    SwitchToBackup,
    /// Give up and surface the error
    Fail,
}

/// Tracks retry budget across primary and backup models
#[derive(Debug, Clone)]
pub struct RetryState {
    max_retries: u32,
    backoff_ms: u64,
    has_backup: bool,
    failures_on_model: u32,
    on_backup: bool,
}

impl RetryState {
    pub fn new(max_retries: u32, backoff_ms: u64, has_backup: bool) -> Self {
        Self {
            max_retries,
            backoff_ms,
            has_backup,
            failures_on_model: 0,
            on_backup: false,
        }
    }

    /// Record one failure and decide the next move
    ///
    /// Non-transient failures are never retried: the same request would
    /// fail the same way on any model.
    pub fn next(&mut self, transient: bool) -> RetryDirective {
        if !transient {
            return RetryDirective::Fail;
        }

        self.failures_on_model += 1;
        if self.failures_on_model <= self.max_retries {
            let delay = self.backoff_ms * self.failures_on_model as u64;
            return RetryDirective::RetryAfter(Duration::from_millis(delay));
        }

        if self.has_backup && !self.on_backup {
            self.on_backup = true;
            self.failures_on_model = 0;
            return RetryDirective::SwitchToBackup;
        }

        RetryDirective::Fail
    }

    pub fn on_backup(&self) -> bool {
        self.on_backup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_failures_walk_retry_then_backup_then_fail() {
        let mut state = RetryState::new(2, 100, true);

        assert_eq!(
            state.next(true),
            RetryDirective::RetryAfter(Duration::from_millis(100))
        );
        assert_eq!(
            state.next(true),
            RetryDirective::RetryAfter(Duration::from_millis(200))
        );
        assert_eq!(state.next(true), RetryDirective::SwitchToBackup);
        assert!(state.on_backup());

        // The backup model gets the same retry budget.
        assert_eq!(
            state.next(true),
            RetryDirective::RetryAfter(Duration::from_millis(100))
        );
        assert_eq!(
            state.next(true),
            RetryDirective::RetryAfter(Duration::from_millis(200))
        );
        assert_eq!(state.next(true), RetryDirective::Fail);
    }

    #[test]
    fn test_non_transient_failure_fails_immediately() {
        let mut state = RetryState::new(3, 100, true);
        assert_eq!(state.next(false), RetryDirective::Fail);
        assert!(!state.on_backup());
    }

    #[test]
    fn test_no_backup_fails_after_retries() {
        let mut state = RetryState::new(1, 50, false);
        assert_eq!(
            state.next(true),
            RetryDirective::RetryAfter(Duration::from_millis(50))
        );
        assert_eq!(state.next(true), RetryDirective::Fail);
    }

    #[test]
    fn test_zero_retries_goes_straight_to_backup() {
        let mut state = RetryState::new(0, 100, true);
        assert_eq!(state.next(true), RetryDirective::SwitchToBackup);
        assert_eq!(state.next(true), RetryDirective::Fail);
    }
}
