use std::collections::HashSet;

use practice_core::model::{PracticeSessionConfig, Question, QuestionId};

use super::filter::filter_pool;

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlan {
    pub questions: Vec<Question>,
    pub pool_size: usize,
    pub matched: usize,
}

impl SessionPlan {
    /// Total number of questions selected for the session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Returns true when no questions were selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Builds a session's question list from a candidate pool.
///
/// Applies the config's filters, then bounds the result at the requested
/// question count. Selection is deterministic: the filtered pool's order is
/// preserved and no shuffling is applied, so replaying the same inputs yields
/// the same session.
pub struct SessionBuilder<'a> {
    config: &'a PracticeSessionConfig,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a PracticeSessionConfig) -> Self {
        Self { config }
    }

    /// Build a plan from the candidate pool.
    ///
    /// `missed` is the set of previously-incorrect question ids for the
    /// current user, consulted only by the only-mistakes filter dimension.
    /// Selects `min(requested_count, filtered_len)` questions; with no
    /// requested count the whole filtered pool is kept.
    #[must_use]
    pub fn build(self, pool: Vec<Question>, missed: &HashSet<QuestionId>) -> SessionPlan {
        let pool_size = pool.len();
        let mut questions = filter_pool(pool, missed, self.config.filters());
        let matched = questions.len();

        if let Some(count) = self.config.question_count() {
            let cap = usize::try_from(count).unwrap_or(usize::MAX);
            questions.truncate(cap);
        }

        SessionPlan {
            questions,
            pool_size,
            matched,
        }
    }
}
