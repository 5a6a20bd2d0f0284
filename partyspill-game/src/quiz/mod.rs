//! Quizzes with obfuscated answers, password-gated answer reviews and the
//! attempt history.
pub mod attempts;
pub mod catalog;
pub mod cipher;

pub use attempts::{AttemptLog, QuizBook};
pub use catalog::{
    QuizCategory, all_question_refs, categories, question_by_ref, quiz_by_id, quizzes,
};
pub use cipher::{CipherError, decode_answer, encode_answer, hash_password};

use crate::constants::{ENCRYPTION_SALT, LEGACY_QUIZ_PASSWORD, WRONG_PASSWORD_MESSAGE};
use crate::{KeyValueStore, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("{}", WRONG_PASSWORD_MESSAGE)]
    WrongPassword,
    #[error("unknown quiz: {0}")]
    UnknownQuiz(String),
}

/// How a question is asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
    },
    Text,
    Image {
        #[serde(rename = "imageUrl")]
        image_url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "answer")]
    pub obfuscated_answer: String,
}

impl QuizQuestion {
    /// Decoded answer, or `None` if the stored value cannot be decoded.
    #[must_use]
    pub fn reveal_answer(&self) -> Option<String> {
        match decode_answer(&self.obfuscated_answer, ENCRYPTION_SALT) {
            Ok(answer) => Some(answer),
            Err(err) => {
                log::warn!("question {} answer unreadable: {err}", self.id);
                None
            }
        }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::MultipleChoice { options } => options,
            QuestionKind::Text | QuestionKind::Image { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<QuizQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl Quiz {
    #[must_use]
    pub fn question(&self, question_id: &str) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// Question identity across quizzes; question ids alone repeat between quizzes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionRef {
    pub quiz_id: String,
    pub question_id: String,
}

impl QuestionRef {
    #[must_use]
    pub fn new(quiz_id: impl Into<String>, question_id: impl Into<String>) -> Self {
        Self {
            quiz_id: quiz_id.into(),
            question_id: question_id.into(),
        }
    }

    /// Stored form: `quiz:question`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.quiz_id, self.question_id)
    }

    #[must_use]
    pub fn parse_key(key: &str) -> Option<Self> {
        let (quiz_id, question_id) = key.split_once(':')?;
        if quiz_id.is_empty() || question_id.is_empty() {
            return None;
        }
        Some(Self::new(quiz_id, question_id))
    }
}

impl fmt::Display for QuestionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.quiz_id, self.question_id)
    }
}

impl Serialize for QuestionRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for QuestionRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Self::parse_key(&key)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid question key {key:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub question_id: String,
    pub answer: String,
}

/// One completed pass through a quiz. `timestamp` is Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub quiz_id: String,
    pub timestamp: u64,
    pub answers: Vec<UserAnswer>,
}

/// Check a password against a quiz's hash, or the legacy literal when the
/// quiz has none (or no quiz is given).
#[must_use]
pub fn is_password_correct(password: &str, quiz: Option<&Quiz>) -> bool {
    match quiz.and_then(|q| q.password_hash.as_deref()) {
        Some(expected) => hash_password(password) == expected,
        None => password == LEGACY_QUIZ_PASSWORD,
    }
}

fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// A question next to the player's answer and the revealed solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLine {
    pub question_id: String,
    pub prompt: String,
    pub user_answer: Option<String>,
    pub correct_answer: Option<String>,
    pub is_correct: bool,
}

/// Reveal the solutions for `answers` once the password checks out.
///
/// # Errors
///
/// Returns [`QuizError::WrongPassword`] when the password does not match.
pub fn review(
    quiz: &Quiz,
    answers: &[UserAnswer],
    password: &str,
) -> Result<Vec<ReviewLine>, QuizError> {
    if !is_password_correct(password, Some(quiz)) {
        return Err(QuizError::WrongPassword);
    }
    let lines = quiz
        .questions
        .iter()
        .map(|question| {
            let user_answer = answers
                .iter()
                .find(|a| a.question_id == question.id)
                .map(|a| a.answer.clone());
            let correct_answer = question.reveal_answer();
            let is_correct = matches!(
                (&user_answer, &correct_answer),
                (Some(given), Some(expected)) if answers_match(given, expected)
            );
            ReviewLine {
                question_id: question.id.clone(),
                prompt: question.prompt.clone(),
                user_answer,
                correct_answer,
                is_correct,
            }
        })
        .collect();
    Ok(lines)
}

/// Insert or replace the answer for `question_id`.
pub fn upsert_answer(answers: &mut Vec<UserAnswer>, question_id: &str, answer: &str) {
    match answers.iter_mut().find(|a| a.question_id == question_id) {
        Some(existing) => existing.answer = answer.to_string(),
        None => answers.push(UserAnswer {
            question_id: question_id.to_string(),
            answer: answer.to_string(),
        }),
    }
}

/// Answering a quiz one question at a time.
#[derive(Debug, Clone)]
pub struct QuizRun<'a> {
    quiz: &'a Quiz,
    current: usize,
    answers: Vec<UserAnswer>,
    completed: bool,
}

impl<'a> QuizRun<'a> {
    #[must_use]
    pub const fn new(quiz: &'a Quiz) -> Self {
        Self {
            quiz,
            current: 0,
            answers: Vec::new(),
            completed: false,
        }
    }

    /// Continue with answers from an earlier attempt.
    #[must_use]
    pub const fn resume(quiz: &'a Quiz, answers: Vec<UserAnswer>) -> Self {
        Self {
            quiz,
            current: 0,
            answers,
            completed: false,
        }
    }

    #[must_use]
    pub const fn quiz(&self) -> &'a Quiz {
        self.quiz
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&'a QuizQuestion> {
        self.quiz.questions.get(self.current)
    }

    #[must_use]
    pub fn answers(&self) -> &[UserAnswer] {
        &self.answers
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        let question = self.current_question()?;
        self.answers
            .iter()
            .find(|a| a.question_id == question.id)
            .map(|a| a.answer.as_str())
    }

    /// Record an answer for the current question.
    pub fn answer(&mut self, text: &str) {
        if let Some(question) = self.current_question() {
            upsert_answer(&mut self.answers, &question.id, text);
        }
    }

    /// Move forward; false when already on the last question.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.quiz.questions.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move back; false when already on the first question.
    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Close the run and append its attempt to `book`.
    ///
    /// The run stays open when the attempt could not be saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn finish<S: KeyValueStore>(
        &mut self,
        book: &QuizBook<S>,
        timestamp_ms: u64,
    ) -> Result<QuizAttempt, StorageError> {
        let attempt = QuizAttempt {
            quiz_id: self.quiz.id.clone(),
            timestamp: timestamp_ms,
            answers: self.answers.clone(),
        };
        book.record(attempt.clone())?;
        self.completed = true;
        Ok(attempt)
    }

    pub fn restart(&mut self) {
        self.current = 0;
        self.answers.clear();
        self.completed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, Repository};

    fn sample_quiz(password_hash: Option<String>) -> Quiz {
        Quiz {
            id: "sample".to_string(),
            title: "Sample".to_string(),
            description: "Two questions".to_string(),
            questions: vec![
                QuizQuestion {
                    id: "1".to_string(),
                    kind: QuestionKind::Text,
                    prompt: "Capital of Norway?".to_string(),
                    obfuscated_answer: encode_answer("Oslo", ENCRYPTION_SALT).unwrap(),
                },
                QuizQuestion {
                    id: "2".to_string(),
                    kind: QuestionKind::MultipleChoice {
                        options: vec!["1814".to_string(), "1905".to_string()],
                    },
                    prompt: "Constitution year?".to_string(),
                    obfuscated_answer: encode_answer("1814", ENCRYPTION_SALT).unwrap(),
                },
            ],
            password_hash,
        }
    }

    #[test]
    fn legacy_password_applies_without_hash() {
        let quiz = sample_quiz(None);
        assert!(is_password_correct("17mai", Some(&quiz)));
        assert!(!is_password_correct("17MAI", Some(&quiz)));
        assert!(is_password_correct("17mai", None));
        assert!(!is_password_correct("", None));
    }

    #[test]
    fn per_quiz_hash_overrides_legacy_password() {
        let quiz = sample_quiz(Some(hash_password("hemmelig")));
        assert!(is_password_correct("hemmelig", Some(&quiz)));
        assert!(!is_password_correct("17mai", Some(&quiz)));
    }

    #[test]
    fn review_requires_password_and_grades_loosely() {
        let quiz = sample_quiz(None);
        let answers = vec![UserAnswer {
            question_id: "1".to_string(),
            answer: "  oslo ".to_string(),
        }];
        assert_eq!(review(&quiz, &answers, "wrong"), Err(QuizError::WrongPassword));
        assert_eq!(QuizError::WrongPassword.to_string(), WRONG_PASSWORD_MESSAGE);

        let lines = review(&quiz, &answers, "17mai").unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].is_correct);
        assert_eq!(lines[0].correct_answer.as_deref(), Some("Oslo"));
        assert_eq!(lines[1].user_answer, None);
        assert!(!lines[1].is_correct);
    }

    #[test]
    fn question_json_uses_type_tag() {
        let quiz = sample_quiz(None);
        let json = serde_json::to_value(&quiz.questions[1]).unwrap();
        assert_eq!(json["type"], "multiple-choice");
        assert_eq!(json["options"][0], "1814");
        assert_eq!(json["question"], "Constitution year?");
        let back: QuizQuestion = serde_json::from_value(json).unwrap();
        assert_eq!(back, quiz.questions[1]);
    }

    #[test]
    fn question_refs_use_colon_keys() {
        let r = QuestionRef::new("norway-quiz", "3");
        assert_eq!(r.key(), "norway-quiz:3");
        assert_eq!(QuestionRef::parse_key("norway-quiz:3"), Some(r.clone()));
        assert_eq!(QuestionRef::parse_key("nocolon"), None);
        assert_eq!(QuestionRef::parse_key(":3"), None);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "\"norway-quiz:3\"");
    }

    #[test]
    fn run_walks_questions_and_upserts_answers() {
        let quiz = sample_quiz(None);
        let mut run = QuizRun::new(&quiz);
        assert!(!run.prev());
        run.answer("Bergen");
        run.answer("Oslo");
        assert_eq!(run.answers().len(), 1);
        assert_eq!(run.current_answer(), Some("Oslo"));
        assert!(run.next());
        run.answer("1814");
        assert!(!run.next());
        let book = QuizBook::new(Repository::new(MemoryStore::default()));
        let attempt = run.finish(&book, 1_700_000_000_000).unwrap();
        assert!(run.is_completed());
        assert_eq!(attempt.quiz_id, "sample");
        assert_eq!(attempt.answers.len(), 2);
        assert_eq!(book.log().unwrap().latest_for("sample"), Some(&attempt));

        run.restart();
        assert_eq!(run.current_index(), 0);
        assert!(run.answers().is_empty());
        assert!(!run.is_completed());
    }
}
