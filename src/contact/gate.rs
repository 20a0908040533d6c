//! Client-side submission cooldown.
//!
//! Best-effort throttle between successful submissions of one form instance.
//! Anything bypassing the form bypasses the gate too.

use std::time::Duration;

/// Default time between two successful submissions.
pub const DEFAULT_COOLDOWN_MS: i64 = 30_000;

/// Outcome of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    pub allowed: bool,
    /// Whole seconds until the next attempt is allowed, rounded up. Zero when allowed.
    pub remaining_seconds: u64,
}

/// Decide whether a submission at `now_ms` may proceed after a success at
/// `last_submit_ms`. The boundary is inclusive: exactly `cooldown_ms` later is allowed.
pub fn can_submit(now_ms: i64, last_submit_ms: i64, cooldown_ms: i64) -> GateDecision {
    let elapsed = now_ms.saturating_sub(last_submit_ms).max(0);
    if elapsed >= cooldown_ms {
        return GateDecision {
            allowed: true,
            remaining_seconds: 0,
        };
    }

    let remaining_ms = (cooldown_ms - elapsed) as u64;
    GateDecision {
        allowed: false,
        remaining_seconds: remaining_ms.div_ceil(1000),
    }
}

/// Cooldown state owned by one form instance.
#[derive(Debug, Clone)]
pub struct SubmissionGate {
    cooldown_ms: i64,
    last_submit_ms: Option<i64>,
}

impl SubmissionGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown_ms: i64::try_from(cooldown.as_millis()).unwrap_or(i64::MAX),
            last_submit_ms: None,
        }
    }

    /// Check without changing state. Always allowed before the first success.
    pub fn check(&self, now_ms: i64) -> GateDecision {
        match self.last_submit_ms {
            Some(last) => can_submit(now_ms, last, self.cooldown_ms),
            None => GateDecision {
                allowed: true,
                remaining_seconds: 0,
            },
        }
    }

    /// Start the cooldown. Call only after the backend confirmed success.
    pub fn record_success(&mut self, now_ms: i64) {
        self.last_submit_ms = Some(now_ms);
    }

    pub fn last_submit_ms(&self) -> Option<i64> {
        self.last_submit_ms
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms as u64)
    }
}

impl Default for SubmissionGate {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_COOLDOWN_MS as u64))
    }
}
