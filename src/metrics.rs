//! Per-session counters.
//!
//! A [`SessionMetrics`] is shared (behind an `Arc`) between the dispatcher and the idle
//! timer tasks it spawns. The live-timer gauge doubles as the check for the
//! one-armed-timer invariant in tests.
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct SessionMetrics {
    timers_armed: AtomicU64,
    timers_disarmed: AtomicU64,
    timers_fired: AtomicU64,
    live_timers: AtomicU64,
    keys_read: AtomicU64,
    unrecognized_keys: AtomicU64,
    actions_run: AtomicU64,
    input_releases: AtomicU64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_arm(&self) {
        self.timers_armed.fetch_add(1, Ordering::Relaxed);
        self.live_timers.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_disarm(&self) {
        self.timers_disarmed.fetch_add(1, Ordering::Relaxed);
        self.live_timers.fetch_sub(1, Ordering::SeqCst);
    }

    pub(crate) fn record_fire(&self) {
        self.timers_fired.fetch_add(1, Ordering::Relaxed);
        self.live_timers.fetch_sub(1, Ordering::SeqCst);
    }

    pub(crate) fn record_key(&self) {
        self.keys_read.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unrecognized(&self) {
        self.unrecognized_keys.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_action(&self) {
        self.actions_run.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_input_release(&self) {
        self.input_releases.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of idle timers currently armed.
    pub fn live_timers(&self) -> u64 {
        self.live_timers.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            timers_armed: self.timers_armed.load(Ordering::Relaxed),
            timers_disarmed: self.timers_disarmed.load(Ordering::Relaxed),
            timers_fired: self.timers_fired.load(Ordering::Relaxed),
            live_timers: self.live_timers(),
            keys_read: self.keys_read.load(Ordering::Relaxed),
            unrecognized_keys: self.unrecognized_keys.load(Ordering::Relaxed),
            actions_run: self.actions_run.load(Ordering::Relaxed),
            input_releases: self.input_releases.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub timers_armed: u64,
    pub timers_disarmed: u64,
    pub timers_fired: u64,
    pub live_timers: u64,
    pub keys_read: u64,
    pub unrecognized_keys: u64,
    pub actions_run: u64,
    pub input_releases: u64,
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "keys={} unrecognized={} actions={} timers_armed={} disarmed={} fired={} live={} input_releases={}",
            self.keys_read,
            self.unrecognized_keys,
            self.actions_run,
            self.timers_armed,
            self.timers_disarmed,
            self.timers_fired,
            self.live_timers,
            self.input_releases
        )
    }
}
