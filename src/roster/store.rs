//! Lock-guarded in-memory student store.

use crate::{
    metrics::{MetricsSnapshot, RosterMetrics},
    roster::{
        profile::describe,
        types::{RosterError, Student, StudentDraft, StudentId},
    },
};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Owns every student record and the identifier sequence behind a single lock.
///
/// All operations, regardless of which id they target, serialize against one another. The lock
/// is never held across an `.await`, so handlers may call the store directly from async code.
/// Metric counters are bumped and read while the lock is held, so a snapshot always agrees
/// with the record count it reports.
/// Construct the store once near process start and share it through an `Arc`.
pub struct StudentStore {
    inner: Mutex<Roster>,
    metrics: RosterMetrics,
}

struct Roster {
    students: BTreeMap<StudentId, Student>,
    next_id: StudentId,
}

/// Abstraction over the roster used by the HTTP surface.
pub trait RosterApi: Send + Sync {
    /// Store a new record under the next identifier and return it.
    fn create(&self, draft: StudentDraft) -> Student;

    /// Return every live record.
    fn list(&self) -> Vec<Student>;

    /// Fetch a single record.
    fn get(&self, id: StudentId) -> Result<Student, RosterError>;

    /// Overwrite an existing record, keeping its identifier.
    fn replace(&self, id: StudentId, draft: StudentDraft) -> Result<Student, RosterError>;

    /// Remove a record.
    fn delete(&self, id: StudentId) -> Result<(), RosterError>;

    /// Return the cached profile summary, computing and caching it on first use.
    fn profile(&self, id: StudentId) -> Result<String, RosterError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl StudentStore {
    /// Build an empty store whose first assigned identifier is `1`.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Roster {
                students: BTreeMap::new(),
                next_id: 1,
            }),
            metrics: RosterMetrics::new(),
        }
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.inner.lock().students.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StudentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterApi for StudentStore {
    fn create(&self, draft: StudentDraft) -> Student {
        let student = {
            let mut roster = self.inner.lock();
            let id = roster.next_id;
            roster.next_id += 1;
            let student = draft.into_student(id);
            roster.students.insert(id, student.clone());
            self.metrics.record_created();
            student
        };
        tracing::debug!(id = student.id, "Created student");
        student
    }

    fn list(&self) -> Vec<Student> {
        self.inner.lock().students.values().cloned().collect()
    }

    fn get(&self, id: StudentId) -> Result<Student, RosterError> {
        self.inner
            .lock()
            .students
            .get(&id)
            .cloned()
            .ok_or(RosterError::NotFound { id })
    }

    fn replace(&self, id: StudentId, draft: StudentDraft) -> Result<Student, RosterError> {
        let student = {
            let mut roster = self.inner.lock();
            let slot = roster
                .students
                .get_mut(&id)
                .ok_or(RosterError::NotFound { id })?;
            *slot = draft.into_student(id);
            let student = slot.clone();
            self.metrics.record_updated();
            student
        };
        tracing::debug!(id, "Replaced student");
        Ok(student)
    }

    fn delete(&self, id: StudentId) -> Result<(), RosterError> {
        {
            let mut roster = self.inner.lock();
            roster
                .students
                .remove(&id)
                .ok_or(RosterError::NotFound { id })?;
            self.metrics.record_deleted();
        }
        tracing::debug!(id, "Deleted student");
        Ok(())
    }

    fn profile(&self, id: StudentId) -> Result<String, RosterError> {
        let (profile, computed) = {
            let mut roster = self.inner.lock();
            let student = roster
                .students
                .get_mut(&id)
                .ok_or(RosterError::NotFound { id })?;
            let computed = student.profile.is_none();
            if computed {
                student.profile = Some(describe(student));
            }
            self.metrics.record_profile(computed);
            (student.profile.clone().unwrap_or_default(), computed)
        };
        tracing::debug!(id, computed, "Resolved student profile");
        Ok(profile)
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        let roster = self.inner.lock();
        self.metrics.snapshot(roster.students.len())
    }
}
