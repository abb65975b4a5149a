use std::collections::HashSet;

use practice_core::model::{PracticeFilters, Question, QuestionId};

/// Select the questions eligible for a session from a candidate pool.
///
/// Unpublished questions are excluded unconditionally; publication is a hard
/// precondition, not a filter dimension. Every remaining question must satisfy
/// all present dimensions of `filters`, with `missed` supplying the membership
/// set behind the only-mistakes dimension. Input order is preserved and an
/// empty result is valid.
#[must_use]
pub fn filter_pool(
    pool: Vec<Question>,
    missed: &HashSet<QuestionId>,
    filters: &PracticeFilters,
) -> Vec<Question> {
    pool.into_iter()
        .filter(Question::is_published)
        .filter(|question| filters.matches(question, missed))
        .collect()
}
