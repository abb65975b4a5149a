use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

use practice_core::model::{
    OptionId, PracticeSessionConfig, Question, QuestionAttempt, QuestionId, SessionAnswer,
};

use crate::error::SessionError;
use super::progress::SessionProgress;

//
// ─── PRACTICE SESSION ──────────────────────────────────────────────────────────
//

/// In-memory state of one practice session.
///
/// Owns the config, the ordered question list (immutable after construction),
/// the answer map, and a forward-only cursor. Mutated exclusively through
/// `record_answer`; every rejected call leaves the state unchanged. One value
/// per active session, never shared across callers.
pub struct PracticeSession {
    config: PracticeSessionConfig,
    questions: Vec<Question>,
    answers: HashMap<QuestionId, SessionAnswer>,
    attempts: Vec<QuestionAttempt>,
    current: usize,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    summary_id: Option<i64>,
}

impl PracticeSession {
    /// Create a session over an already-selected question list.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided; callers
    /// must surface this rather than starting a zero-question session.
    pub fn new(
        config: PracticeSessionConfig,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            config,
            questions,
            answers: HashMap::new(),
            attempts: Vec::new(),
            current: 0,
            started_at,
            completed_at: None,
            summary_id: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PracticeSessionConfig {
        &self.config
    }

    /// Questions selected for this session, in answering order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn summary_id(&self) -> Option<i64> {
        self.summary_id
    }

    /// Attempt records produced so far, one per recorded answer, in recording
    /// order. The caller is responsible for persisting them.
    #[must_use]
    pub fn attempts(&self) -> &[QuestionAttempt] {
        &self.attempts
    }

    /// The recorded answer for a question, if any.
    #[must_use]
    pub fn answer_for(&self, question_id: QuestionId) -> Option<SessionAnswer> {
        self.answers.get(&question_id).copied()
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Number of questions that have already been answered.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Number of remaining unanswered questions.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.questions.len().saturating_sub(self.current)
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total_questions(),
            answered: self.answered_count(),
            remaining: self.remaining(),
            is_complete: self.is_complete(),
        }
    }

    /// The question at the cursor, or `None` once the session is complete.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Record the answer for the current question and advance the cursor.
    ///
    /// Correctness is derived here by comparing `selected_option_id` against
    /// the question's answer key and is never recomputed downstream. Each
    /// successful call produces exactly one `QuestionAttempt` (returned, and
    /// retained in `attempts()`), and completes the session once the cursor
    /// passes the last question. `answered_at` should come from the services
    /// layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session is already finished,
    /// `SessionError::Duplicate` if the question already has a recorded
    /// answer, or `SessionError::OutOfSequence` if `question_id` is not the
    /// cursor's question. No error mutates the state.
    pub fn record_answer(
        &mut self,
        question_id: QuestionId,
        selected_option_id: OptionId,
        answered_at: DateTime<Utc>,
    ) -> Result<&QuestionAttempt, SessionError> {
        if self.answers.contains_key(&question_id) {
            return Err(SessionError::Duplicate(question_id));
        }
        let Some(current) = self.questions.get(self.current) else {
            return Err(SessionError::Completed);
        };
        if current.id() != question_id {
            return Err(SessionError::OutOfSequence {
                expected: current.id(),
                got: question_id,
            });
        }

        let is_correct = current.is_correct(selected_option_id);
        let course_id = self.config.course_id();

        self.answers.insert(
            question_id,
            SessionAnswer {
                selected_option_id,
                is_correct,
            },
        );
        self.attempts.push(QuestionAttempt::new(
            question_id,
            course_id,
            selected_option_id,
            is_correct,
            answered_at,
        ));

        self.current += 1;
        if self.current >= self.questions.len() {
            self.completed_at = Some(answered_at);
        }

        self.attempts.last().ok_or(SessionError::Completed)
    }

    pub(crate) fn set_summary_id(&mut self, id: i64) {
        self.summary_id = Some(id);
    }
}

impl fmt::Debug for PracticeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("course_id", &self.config.course_id())
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .field("summary_id", &self.summary_id)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
