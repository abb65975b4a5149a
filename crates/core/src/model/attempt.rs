use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{AttemptId, CourseId, OptionId, QuestionId};

//
// ─── SESSION ANSWER ────────────────────────────────────────────────────────────
//

/// In-session record of one answered question, keyed by question id in the
/// session state. Correctness is derived by the recorder, never user-supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionAnswer {
    pub selected_option_id: OptionId,
    pub is_correct: bool,
}

//
// ─── QUESTION ATTEMPT ──────────────────────────────────────────────────────────
//

/// Persisted record of one answered question.
///
/// Written exactly once per question per session and handed to the caller for
/// external persistence; never mutated by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAttempt {
    id: AttemptId,
    question_id: QuestionId,
    course_id: CourseId,
    selected_option_id: OptionId,
    is_correct: bool,
    attempted_at: DateTime<Utc>,
}

impl QuestionAttempt {
    /// Create an attempt record with a fresh random id.
    #[must_use]
    pub fn new(
        question_id: QuestionId,
        course_id: CourseId,
        selected_option_id: OptionId,
        is_correct: bool,
        attempted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AttemptId::random(),
            question_id,
            course_id,
            selected_option_id,
            is_correct,
            attempted_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> AttemptId {
        self.id
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn selected_option_id(&self) -> OptionId {
        self.selected_option_id
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn attempted_at(&self) -> DateTime<Utc> {
        self.attempted_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn attempt_carries_grading_outcome() {
        let attempt = QuestionAttempt::new(
            QuestionId::new(7),
            CourseId::new(1),
            OptionId::new(3),
            true,
            fixed_now(),
        );
        assert_eq!(attempt.question_id(), QuestionId::new(7));
        assert_eq!(attempt.selected_option_id(), OptionId::new(3));
        assert!(attempt.is_correct());
        assert_eq!(attempt.attempted_at(), fixed_now());
    }

    #[test]
    fn each_attempt_gets_its_own_id() {
        let a = QuestionAttempt::new(
            QuestionId::new(1),
            CourseId::new(1),
            OptionId::new(1),
            false,
            fixed_now(),
        );
        let b = QuestionAttempt::new(
            QuestionId::new(1),
            CourseId::new(1),
            OptionId::new(1),
            false,
            fixed_now(),
        );
        assert_ne!(a.id(), b.id());
    }
}
