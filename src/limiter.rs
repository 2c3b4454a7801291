//! Per-player trigger rate limiting.
//!
//! Tracks the last admitted trigger per player identity in a shared map.
//! Denial never touches stored state: N denials inside one window all report
//! their wait relative to the same admitted trigger, so retrying cannot
//! postpone the window. Admission overwrites the timestamp and starts a
//! fresh window.

use crate::roster::PlayerId;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

/// Entries older than this many windows are dropped by [`TriggerLimiter::sweep`].
const SWEEP_FACTOR: u64 = 10;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Denied { retry_after_secs: u32 },
}

/// Thread-safe per-identity trigger limiter.
///
/// State is in-memory and session-scoped by design; nothing survives a
/// process restart.
#[derive(Debug)]
pub struct TriggerLimiter {
    /// Last admitted trigger per identity, epoch milliseconds.
    last_trigger_ms: DashMap<PlayerId, u64>,
    window_secs: u32,
}

impl TriggerLimiter {
    pub fn new(window_secs: u32) -> Self {
        Self {
            last_trigger_ms: DashMap::new(),
            window_secs,
        }
    }

    /// Check-and-update for one trigger attempt.
    ///
    /// A player who has never triggered is admitted. Otherwise the attempt is
    /// admitted iff at least one full window has elapsed since the last
    /// admitted trigger (the boundary is inclusive: exactly one window
    /// admits). The entry guard makes the read-modify-write atomic per
    /// identity, so overlapping attempts by the same player serialize here.
    pub fn try_admit(&self, id: &PlayerId, now_ms: u64) -> Admission {
        let window_ms = u64::from(self.window_secs) * 1000;
        match self.last_trigger_ms.entry(id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(now_ms);
                Admission::Admitted
            }
            Entry::Occupied(mut slot) => {
                let elapsed = now_ms.saturating_sub(*slot.get());
                if elapsed < window_ms {
                    let remaining_ms = window_ms - elapsed;
                    let retry_after_secs =
                        u32::try_from(remaining_ms.div_ceil(1000)).unwrap_or(self.window_secs);
                    debug!(player = %id, retry_after_secs, "trigger rate limited");
                    Admission::Denied { retry_after_secs }
                } else {
                    slot.insert(now_ms);
                    Admission::Admitted
                }
            }
        }
    }

    /// Drop entries whose last trigger is older than [`SWEEP_FACTOR`]
    /// windows, returning the number removed.
    ///
    /// Intended for a periodic host maintenance task; the limiter never
    /// sweeps on its own.
    pub fn sweep(&self, now_ms: u64) -> usize {
        let horizon_ms = u64::from(self.window_secs) * 1000 * SWEEP_FACTOR;
        let before = self.last_trigger_ms.len();
        self.last_trigger_ms
            .retain(|_, last| now_ms.saturating_sub(*last) <= horizon_ms);
        let removed = before.saturating_sub(self.last_trigger_ms.len());
        if removed > 0 {
            debug!(removed, "swept stale rate-limit entries");
        }
        removed
    }

    /// Number of tracked identities.
    pub fn len(&self) -> usize {
        self.last_trigger_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_trigger_ms.is_empty()
    }
}
