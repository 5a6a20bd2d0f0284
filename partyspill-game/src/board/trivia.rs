//! Trivia questions drawn without replacement across all quizzes.
use crate::quiz::{QuestionRef, all_question_refs};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriviaDeck {
    used: BTreeSet<QuestionRef>,
}

impl TriviaDeck {
    #[must_use]
    pub const fn new(used: BTreeSet<QuestionRef>) -> Self {
        Self { used }
    }

    #[must_use]
    pub const fn used(&self) -> &BTreeSet<QuestionRef> {
        &self.used
    }

    /// Questions not yet drawn, in catalog order.
    #[must_use]
    pub fn remaining(&self) -> Vec<QuestionRef> {
        all_question_refs()
            .into_iter()
            .filter(|question| !self.used.contains(question))
            .collect()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_empty()
    }

    /// Draw one unused question uniformly and mark it used.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<QuestionRef> {
        let picked = self.remaining().choose(rng).cloned()?;
        self.used.insert(picked.clone());
        log::debug!("drew trivia question {picked} ({} used)", self.used.len());
        Some(picked)
    }

    pub fn reset(&mut self) {
        self.used.clear();
    }
}
