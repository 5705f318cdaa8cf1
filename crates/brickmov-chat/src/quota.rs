// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-visitor chat quota accounting.
//!
//! Each visitor session gets a fixed number of chat calls per rolling
//! window. Windows expire lazily: the first call after expiry resets the
//! slot, nothing sweeps in the background.

use std::time::{Duration, Instant};

use dashmap::DashMap;

#[derive(Debug)]
struct Slot {
    count: u32,
    started_at: Instant,
}

/// In-memory quota ledger keyed by visitor session id.
///
/// State is process-local and is lost on restart, which doubles as a
/// quota reset for everyone.
#[derive(Debug)]
pub struct QuotaLedger {
    slots: DashMap<String, Slot>,
    quota: u32,
    window: Duration,
}

impl QuotaLedger {
    pub fn new(quota: u32, window_hours: u64) -> Self {
        Self::with_window(quota, Duration::from_secs(window_hours * 3600))
    }

    pub fn with_window(quota: u32, window: Duration) -> Self {
        Self {
            slots: DashMap::new(),
            quota,
            window,
        }
    }

    /// Reserves one call for `key`, returning the calls left after this
    /// one. Returns `None` when the quota for the current window is spent.
    ///
    /// The check and the increment happen under the same map entry guard,
    /// so concurrent callers cannot overshoot the quota.
    pub fn try_begin(&self, key: &str) -> Option<u32> {
        let mut slot = self
            .slots
            .entry(key.to_string())
            .or_insert_with(|| Slot {
                count: 0,
                started_at: Instant::now(),
            });

        if slot.started_at.elapsed() >= self.window {
            slot.count = 0;
            slot.started_at = Instant::now();
        }

        if slot.count >= self.quota {
            return None;
        }

        slot.count += 1;
        Some(self.quota - slot.count)
    }

    /// Returns a reservation made by [`try_begin`](Self::try_begin).
    /// Called when the upstream request fails, so failed calls stay free.
    pub fn release(&self, key: &str) {
        if let Some(mut slot) = self.slots.get_mut(key) {
            slot.count = slot.count.saturating_sub(1);
        }
    }
}
