use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing roster activity.
#[derive(Default)]
pub struct RosterMetrics {
    students_created: AtomicU64,
    students_updated: AtomicU64,
    students_deleted: AtomicU64,
    profiles_computed: AtomicU64,
    profile_cache_hits: AtomicU64,
}

impl RosterMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly created student.
    pub fn record_created(&self) {
        self.students_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful replacement.
    pub fn record_updated(&self) {
        self.students_updated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful deletion.
    pub fn record_deleted(&self) {
        self.students_deleted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a profile lookup, distinguishing fresh computations from cached reads.
    pub fn record_profile(&self, computed: bool) {
        if computed {
            self.profiles_computed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.profile_cache_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Return a snapshot of the current counters alongside the live record count.
    pub fn snapshot(&self, live_students: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            students_created: self.students_created.load(Ordering::Relaxed),
            students_updated: self.students_updated.load(Ordering::Relaxed),
            students_deleted: self.students_deleted.load(Ordering::Relaxed),
            profiles_computed: self.profiles_computed.load(Ordering::Relaxed),
            profile_cache_hits: self.profile_cache_hits.load(Ordering::Relaxed),
            live_students: live_students as u64,
        }
    }
}

/// Immutable view of roster counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Students created since startup.
    pub students_created: u64,
    /// Successful replacements since startup.
    pub students_updated: u64,
    /// Successful deletions since startup.
    pub students_deleted: u64,
    /// Profile summaries rendered and cached.
    pub profiles_computed: u64,
    /// Profile requests answered from the cache.
    pub profile_cache_hits: u64,
    /// Records currently held by the store.
    pub live_students: u64,
}
