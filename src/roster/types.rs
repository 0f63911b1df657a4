//! Record types and error definitions for the student roster.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Identifier assigned to a student by the store.
pub type StudentId = i64;

/// Errors produced by roster operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// No live record carries the requested identifier.
    #[error("student {id} not found")]
    NotFound {
        /// Identifier that was looked up.
        id: StudentId,
    },
}

/// A stored student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Identifier assigned on creation; never reused.
    pub id: StudentId,
    /// Display name as supplied by the caller.
    pub name: String,
    /// Age as supplied by the caller.
    pub age: i64,
    /// Contact address as supplied by the caller.
    pub email: String,
    /// Cached profile summary, populated on first request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

/// Caller-supplied fields used to create or replace a record.
///
/// Unknown fields (including `id` and `profile`) are ignored. Missing and `null` fields fall back
/// to their zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudentDraft {
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Age in years.
    #[serde(deserialize_with = "null_as_default")]
    pub age: i64,
    /// Contact address.
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl StudentDraft {
    /// Build a draft from borrowed field values.
    pub fn new(name: impl Into<String>, age: i64, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
        }
    }

    pub(crate) fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
            profile: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_ignores_id_and_profile_fields() {
        let draft: StudentDraft = serde_json::from_value(json!({
            "id": 99,
            "name": "Ada",
            "age": 30,
            "email": "ada@example.com",
            "profile": "forged"
        }))
        .expect("draft");

        assert_eq!(draft, StudentDraft::new("Ada", 30, "ada@example.com"));
    }

    #[test]
    fn draft_defaults_missing_fields() {
        let draft: StudentDraft = serde_json::from_value(json!({ "name": "Lin" })).expect("draft");
        assert_eq!(draft.name, "Lin");
        assert_eq!(draft.age, 0);
        assert!(draft.email.is_empty());
    }

    #[test]
    fn draft_treats_null_fields_as_zero_values() {
        let draft: StudentDraft =
            serde_json::from_value(json!({ "name": null, "age": null, "email": "lin@example.com" }))
                .expect("draft");
        assert_eq!(draft, StudentDraft::new("", 0, "lin@example.com"));
    }

    #[test]
    fn draft_rejects_mistyped_fields() {
        let result = serde_json::from_value::<StudentDraft>(json!({ "age": "thirty" }));
        assert!(result.is_err());
    }

    #[test]
    fn student_omits_absent_profile() {
        let student = StudentDraft::new("Ada", 30, "ada@example.com").into_student(1);
        let value = serde_json::to_value(&student).expect("serialize");
        assert_eq!(
            value,
            json!({ "id": 1, "name": "Ada", "age": 30, "email": "ada@example.com" })
        );
    }
}
