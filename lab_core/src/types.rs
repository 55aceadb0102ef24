//! Lab Types
//!
//! Core data structures shared by the scorer, the store and the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exercise id of the capstone career plan
pub const CAPSTONE_EXERCISE_ID: &str = "cap_carreira_plano";

/// User id recorded when a submission does not name one
pub const ANONYMOUS_USER: &str = "anon";

/// Free-text answers keyed by field/section name
pub type Answers = HashMap<String, String>;

/// Grade values exactly as received, before any numeric interpretation
pub type RawGrades = HashMap<String, serde_json::Value>;

// ============================================================
// LESSONS
// ============================================================

/// A lesson topic of the course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u32,
    pub code: String,
    pub title: String,
}

// ============================================================
// EXERCISES
// ============================================================

/// One input field of a form-style exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseField {
    pub name: String,
    pub label: String,
    /// "text" renders a single line, anything else a text area
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A static exercise definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Exercise kind, e.g. "form_template"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub fields: Vec<ExerciseField>,
}

/// Contents of one exercise definition file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonExercises {
    pub lesson_code: String,
    pub exercises: Vec<Exercise>,
}

// ============================================================
// SUBMISSIONS
// ============================================================

/// A stored student submission. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: u64,
    pub exercise_id: String,
    pub user_id: String,
    #[serde(default)]
    pub answers: Answers,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Answer for `key`, or the empty string when absent
    pub fn answer(&self, key: &str) -> &str {
        self.answers.get(key).map(String::as_str).unwrap_or("")
    }
}

/// A submission that has not been assigned an id or timestamp yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub exercise_id: String,
    pub user_id: String,
    pub answers: Answers,
}

impl NewSubmission {
    /// Builds a submission, falling back to the anonymous user for a missing or empty id.
    /// The id is stored exactly as given, since lookups match it verbatim.
    pub fn new(exercise_id: &str, user_id: Option<&str>, answers: Option<Answers>) -> Self {
        let user_id = match user_id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => ANONYMOUS_USER.to_string(),
        };
        Self {
            exercise_id: exercise_id.to_string(),
            user_id,
            answers: answers.unwrap_or_default(),
        }
    }
}
