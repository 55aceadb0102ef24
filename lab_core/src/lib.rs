//! Lesson Lab core
//!
//! Domain logic of the classroom lab: lesson catalogue, exercise definitions,
//! submission storage, and the capstone career plan rubric and report.
//! No HTTP here; the server crate wires these pieces together.

pub mod exercises;
pub mod lessons;
pub mod report;
pub mod rubric;
pub mod store;
pub mod types;

pub use exercises::{ExerciseCatalog, ExerciseError};
pub use lessons::{lesson_by_code, lessons};
pub use report::{build_career_plan_report, CareerPlanReport};
pub use rubric::{GradeSet, SectionKey};
pub use store::{InMemorySubmissionStore, StoreError, SubmissionStore};
pub use types::*;

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        assert_eq!(get_version(), "0.1.0");
    }
}
