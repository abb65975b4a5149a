use std::collections::HashSet;

use crate::model::ids::{CourseId, LessonId, QuestionId};
use crate::model::question::{Difficulty, Question, TopicName};

//
// ─── PRACTICE FILTERS ──────────────────────────────────────────────────────────
//

/// Per-dimension question filters. Absence of a field means "no restriction
/// on this dimension"; all present dimensions must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeFilters {
    pub topic: Option<TopicName>,
    pub difficulty: Option<Difficulty>,
    pub only_mistakes: bool,
    pub related_lesson_id: Option<LessonId>,
}

impl PracticeFilters {
    /// Filters with no restriction on any dimension.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_topic(mut self, topic: TopicName) -> Self {
        self.topic = Some(topic);
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn with_only_mistakes(mut self, only_mistakes: bool) -> Self {
        self.only_mistakes = only_mistakes;
        self
    }

    #[must_use]
    pub fn with_related_lesson(mut self, lesson_id: LessonId) -> Self {
        self.related_lesson_id = Some(lesson_id);
        self
    }

    /// Returns true when no dimension restricts the pool.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.topic.is_none()
            && self.difficulty.is_none()
            && !self.only_mistakes
            && self.related_lesson_id.is_none()
    }

    /// Whether a question satisfies every present dimension.
    ///
    /// `missed` is the caller-supplied set of previously-incorrect question
    /// ids, consulted only when `only_mistakes` is set. Topic matching is
    /// exact and case-sensitive. Publication is not checked here; it is a
    /// hard precondition applied by the pool filter.
    #[must_use]
    pub fn matches(&self, question: &Question, missed: &HashSet<QuestionId>) -> bool {
        if let Some(topic) = &self.topic {
            if question.topic() != topic {
                return false;
            }
        }
        if let Some(difficulty) = self.difficulty {
            if question.difficulty() != difficulty {
                return false;
            }
        }
        if self.only_mistakes && !missed.contains(&question.id()) {
            return false;
        }
        if let Some(lesson_id) = self.related_lesson_id {
            if question.related_lesson_id() != Some(lesson_id) {
                return false;
            }
        }
        true
    }
}

//
// ─── SESSION CONFIG ────────────────────────────────────────────────────────────
//

/// Configuration for one practice session. Immutable for the session's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeSessionConfig {
    course_id: CourseId,
    lesson_id: Option<LessonId>,
    filters: PracticeFilters,
    question_count: Option<u32>,
}

impl PracticeSessionConfig {
    #[must_use]
    pub fn new(course_id: CourseId, filters: PracticeFilters) -> Self {
        Self {
            course_id,
            lesson_id: None,
            filters,
            question_count: None,
        }
    }

    /// Restrict the candidate pool to a single lesson's questions.
    #[must_use]
    pub fn with_lesson(mut self, lesson_id: LessonId) -> Self {
        self.lesson_id = Some(lesson_id);
        self
    }

    /// Cap the session at `count` questions. Absence means "whole pool".
    #[must_use]
    pub fn with_question_count(mut self, count: u32) -> Self {
        self.question_count = Some(count);
        self
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn lesson_id(&self) -> Option<LessonId> {
        self.lesson_id
    }

    #[must_use]
    pub fn filters(&self) -> &PracticeFilters {
        &self.filters
    }

    #[must_use]
    pub fn question_count(&self) -> Option<u32> {
        self.question_count
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
