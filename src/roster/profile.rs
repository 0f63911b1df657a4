//! Profile summary rendering.

use super::types::Student;

/// Render the one-line profile summary for a student.
///
/// Runs while the store lock is held, so it must stay a pure string format.
pub fn describe(student: &Student) -> String {
    format!(
        "Name: {}, Age: {}, Contact: {}",
        student.name, student.age, student.email
    )
}
