//! Exercise definitions loaded from JSON files.
//!
//! Each file holds `{ "lessonCode": ..., "exercises": [...] }`. Files that
//! cannot be read or parsed are logged and skipped; the catalogue never
//! fails to load as a whole.

use crate::types::{Exercise, LessonExercises};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ExerciseError {
    #[error("Failed to read exercise file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse exercise JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads one definition file.
///
/// Returns `Ok(None)` for valid JSON that lacks a string `lessonCode` or an
/// `exercises` array.
pub fn load_exercise_file(path: &Path) -> Result<Option<LessonExercises>, ExerciseError> {
    let raw = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    let has_code = value.get("lessonCode").map_or(false, |c| c.is_string());
    let has_list = value.get("exercises").map_or(false, |e| e.is_array());
    if !has_code || !has_list {
        return Ok(None);
    }

    Ok(Some(serde_json::from_value(value)?))
}

/// Exercises grouped by lesson code
#[derive(Debug, Clone, Default)]
pub struct ExerciseCatalog {
    by_lesson: HashMap<String, Vec<Exercise>>,
}

impl ExerciseCatalog {
    /// Loads every `*.json` file of `dir` in file-name order.
    /// A missing directory yields an empty catalogue.
    pub fn load_dir(dir: &Path) -> Self {
        let mut catalog = Self::default();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("[EXERCISES] Cannot read {}: {}", dir.display(), e);
                return catalog;
            }
        };

        let mut files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().map_or(false, |ext| ext == "json"))
            .collect();
        files.sort();

        for path in files {
            match load_exercise_file(&path) {
                Ok(Some(lesson)) => {
                    log::debug!(
                        "[EXERCISES] {} exercises for {} from {}",
                        lesson.exercises.len(),
                        lesson.lesson_code,
                        path.display()
                    );
                    catalog.insert(lesson);
                }
                Ok(None) => {
                    log::warn!("[EXERCISES] Skipping {}: missing lessonCode or exercises", path.display());
                }
                Err(e) => {
                    log::error!("[EXERCISES] Failed to load {}: {}", path.display(), e);
                }
            }
        }

        log::info!("[EXERCISES] Loaded exercises for {} lessons", catalog.lesson_count());
        catalog
    }

    /// Adds or replaces the exercises of one lesson
    pub fn insert(&mut self, lesson: LessonExercises) {
        self.by_lesson.insert(lesson.lesson_code, lesson.exercises);
    }

    /// Exercises of a lesson; empty when the lesson has none
    pub fn for_lesson(&self, code: &str) -> &[Exercise] {
        self.by_lesson.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of the exercises of a lesson
    pub fn exercise_ids(&self, code: &str) -> HashSet<String> {
        self.for_lesson(code).iter().map(|e| e.id.clone()).collect()
    }

    pub fn lesson_count(&self) -> usize {
        self.by_lesson.len()
    }
}
