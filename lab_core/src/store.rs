//! Submission Store
//!
//! Process-lifetime storage for student submissions. Submissions are
//! append-only: never edited, never deleted. Queries return them in
//! insertion order.

use crate::types::{NewSubmission, Submission};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Submission store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage seam for submissions, injected into the HTTP layer
pub trait SubmissionStore: Send + Sync {
    /// Stores a submission, assigning its id and timestamp
    fn append(&self, submission: NewSubmission) -> StoreResult<Submission>;

    /// All submissions of a user
    fn by_user(&self, user_id: &str) -> StoreResult<Vec<Submission>>;

    /// All submissions whose exercise id is in `exercise_ids`
    fn by_exercises(&self, exercise_ids: &HashSet<String>) -> StoreResult<Vec<Submission>>;

    /// Most recent submission of a user for one exercise
    fn latest_for(&self, user_id: &str, exercise_id: &str) -> StoreResult<Option<Submission>> {
        Ok(self
            .by_user(user_id)?
            .into_iter()
            .filter(|s| s.exercise_id == exercise_id)
            .last())
    }
}

/// In-memory store backed by a vector
#[derive(Debug, Default)]
pub struct InMemorySubmissionStore {
    submissions: Mutex<Vec<Submission>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Vec<Submission>>> {
        self.submissions.lock().map_err(|_| StoreError::Poisoned)
    }

    fn filtered<F>(&self, predicate: F) -> StoreResult<Vec<Submission>>
    where
        F: Fn(&Submission) -> bool,
    {
        Ok(self
            .lock()?
            .iter()
            .filter(|s| predicate(s))
            .cloned()
            .collect())
    }
}

impl SubmissionStore for InMemorySubmissionStore {
    fn append(&self, submission: NewSubmission) -> StoreResult<Submission> {
        let mut submissions = self.lock()?;
        let stored = Submission {
            id: submissions.len() as u64 + 1,
            exercise_id: submission.exercise_id,
            user_id: submission.user_id,
            answers: submission.answers,
            created_at: Utc::now(),
        };
        submissions.push(stored.clone());
        log::debug!(
            "[SUBMISSIONS] #{} stored for exercise {} by {}",
            stored.id,
            stored.exercise_id,
            stored.user_id
        );
        Ok(stored)
    }

    fn by_user(&self, user_id: &str) -> StoreResult<Vec<Submission>> {
        self.filtered(|s| s.user_id == user_id)
    }

    fn by_exercises(&self, exercise_ids: &HashSet<String>) -> StoreResult<Vec<Submission>> {
        self.filtered(|s| exercise_ids.contains(&s.exercise_id))
    }

    fn latest_for(&self, user_id: &str, exercise_id: &str) -> StoreResult<Option<Submission>> {
        Ok(self
            .lock()?
            .iter()
            .rev()
            .find(|s| s.user_id == user_id && s.exercise_id == exercise_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Answers, CAPSTONE_EXERCISE_ID};

    fn answers(text: &str) -> Option<Answers> {
        Some(Answers::from([("contexto_atual".to_string(), text.to_string())]))
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let store = InMemorySubmissionStore::new();
        assert!(store.is_empty().unwrap());

        let first = store.append(NewSubmission::new("t1_ex1", Some("ana"), None)).unwrap();
        let second = store.append(NewSubmission::new("t1_ex2", None, None)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.user_id, "anon");
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_queries_keep_insertion_order() {
        let store = InMemorySubmissionStore::new();
        store.append(NewSubmission::new("t1_ex1", Some("ana"), None)).unwrap();
        store.append(NewSubmission::new("t2_ex1", Some("bia"), None)).unwrap();
        store.append(NewSubmission::new("t2_ex1", Some("ana"), None)).unwrap();

        let ana = store.by_user("ana").unwrap();
        assert_eq!(ana.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);

        let ids = HashSet::from(["t2_ex1".to_string()]);
        let t2 = store.by_exercises(&ids).unwrap();
        assert_eq!(t2.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2, 3]);

        assert!(store.by_user("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_latest_for_returns_most_recent() {
        let store = InMemorySubmissionStore::new();
        store
            .append(NewSubmission::new(CAPSTONE_EXERCISE_ID, Some("ana"), answers("v1")))
            .unwrap();
        store
            .append(NewSubmission::new("t1_ex1", Some("ana"), answers("other")))
            .unwrap();
        store
            .append(NewSubmission::new(CAPSTONE_EXERCISE_ID, Some("ana"), answers("v2")))
            .unwrap();

        let latest = store.latest_for("ana", CAPSTONE_EXERCISE_ID).unwrap().unwrap();
        assert_eq!(latest.id, 3);
        assert_eq!(latest.answer("contexto_atual"), "v2");
        assert!(store.latest_for("bia", CAPSTONE_EXERCISE_ID).unwrap().is_none());
    }
}
