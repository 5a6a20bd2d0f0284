//! Append-only log of completed quiz attempts.
use super::{QuizAttempt, UserAnswer};
use crate::storage::Repository;
use crate::{KeyValueStore, StorageError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptLog {
    attempts: Vec<QuizAttempt>,
}

impl AttemptLog {
    #[must_use]
    pub const fn new(attempts: Vec<QuizAttempt>) -> Self {
        Self { attempts }
    }

    pub fn push(&mut self, attempt: QuizAttempt) {
        self.attempts.push(attempt);
    }

    #[must_use]
    pub fn attempts(&self) -> &[QuizAttempt] {
        &self.attempts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Most recent attempt for `quiz_id`; on equal timestamps the later entry wins.
    #[must_use]
    pub fn latest_for(&self, quiz_id: &str) -> Option<&QuizAttempt> {
        self.attempts
            .iter()
            .enumerate()
            .filter(|(_, attempt)| attempt.quiz_id == quiz_id)
            .max_by_key(|(idx, attempt)| (attempt.timestamp, *idx))
            .map(|(_, attempt)| attempt)
    }

    /// Answers of the latest attempt, empty when the quiz was never taken.
    #[must_use]
    pub fn current_answers(&self, quiz_id: &str) -> Vec<UserAnswer> {
        self.latest_for(quiz_id)
            .map(|attempt| attempt.answers.clone())
            .unwrap_or_default()
    }
}

/// Attempt history backed by the key-value store.
pub struct QuizBook<S: KeyValueStore> {
    repo: Repository<S>,
}

impl<S: KeyValueStore> QuizBook<S> {
    #[must_use]
    pub const fn new(repo: Repository<S>) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn log(&self) -> Result<AttemptLog, StorageError> {
        Ok(self.repo.load_quiz_attempts()?.unwrap_or_default())
    }

    /// Append an attempt and persist the whole log.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn record(&self, attempt: QuizAttempt) -> Result<(), StorageError> {
        let mut entries = self.log()?;
        log::debug!(
            "recording attempt for {} with {} answers",
            attempt.quiz_id,
            attempt.answers.len()
        );
        entries.push(attempt);
        self.repo.save_quiz_attempts(&entries)
    }

    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn current_answers(&self, quiz_id: &str) -> Result<Vec<UserAnswer>, StorageError> {
        Ok(self.log()?.current_answers(quiz_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn attempt(quiz_id: &str, timestamp: u64, answer: &str) -> QuizAttempt {
        QuizAttempt {
            quiz_id: quiz_id.to_string(),
            timestamp,
            answers: vec![UserAnswer {
                question_id: "1".to_string(),
                answer: answer.to_string(),
            }],
        }
    }

    #[test]
    fn latest_attempt_wins_by_timestamp() {
        let mut log = AttemptLog::default();
        log.push(attempt("a", 300, "third"));
        log.push(attempt("a", 100, "first"));
        log.push(attempt("b", 900, "other quiz"));
        assert_eq!(log.current_answers("a")[0].answer, "third");
        assert_eq!(log.current_answers("b")[0].answer, "other quiz");
        assert!(log.current_answers("c").is_empty());
    }

    #[test]
    fn equal_timestamps_prefer_the_last_write() {
        let mut log = AttemptLog::default();
        log.push(attempt("a", 5, "older write"));
        log.push(attempt("a", 5, "newer write"));
        assert_eq!(log.latest_for("a").unwrap().answers[0].answer, "newer write");
    }

    #[test]
    fn book_appends_and_survives_corrupt_logs() {
        let store = MemoryStore::default();
        store.insert_raw("quizAttempts", "[{\"quizId\": 4}]");
        let book = QuizBook::new(Repository::new(store.clone()));
        assert!(book.log().unwrap().is_empty());

        book.record(attempt("mixed-quiz", 10, "Oslo")).unwrap();
        book.record(attempt("mixed-quiz", 20, "Bergen")).unwrap();
        let reopened = QuizBook::new(Repository::new(store));
        assert_eq!(reopened.log().unwrap().len(), 2);
        assert_eq!(reopened.current_answers("mixed-quiz").unwrap()[0].answer, "Bergen");
    }
}
