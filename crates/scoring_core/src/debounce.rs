use std::time::Duration;

use shared::domain::Side;

pub const DEFAULT_TAP_WINDOW: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTap {
    pub zone: Side,
    pub at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Second tap on the same zone inside the window: score a point for `zone`.
    Confirmed(Side),
    /// The tap is now the pending one, awaiting confirmation.
    Pending(Side),
}

/// Two-tap confirmation evaluated only when a tap arrives; there are no timers.
#[derive(Debug, Clone)]
pub struct TapDebouncer {
    window: Duration,
    pending: Option<PendingTap>,
}

impl Default for TapDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_TAP_WINDOW)
    }
}

impl TapDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn pending(&self) -> Option<PendingTap> {
        self.pending
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }

    pub fn tap(&mut self, zone: Side, now_ms: u64) -> TapOutcome {
        if let Some(pending) = self.pending {
            if pending.zone == zone && self.within_window(pending.at_ms, now_ms) {
                self.pending = None;
                return TapOutcome::Confirmed(zone);
            }
        }

        self.pending = Some(PendingTap {
            zone,
            at_ms: now_ms,
        });
        TapOutcome::Pending(zone)
    }

    fn within_window(&self, since_ms: u64, now_ms: u64) -> bool {
        // A clock that went backwards never confirms.
        let Some(elapsed) = now_ms.checked_sub(since_ms) else {
            return false;
        };
        u128::from(elapsed) < self.window.as_millis()
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
