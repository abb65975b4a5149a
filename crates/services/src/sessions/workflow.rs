use std::collections::HashSet;
use std::sync::Arc;

use practice_core::model::{OptionId, PracticeSessionConfig, Question, QuestionAttempt};
use storage::repository::{AttemptRepository, QuestionRepository, SummaryRepository};

use crate::Clock;
use crate::error::SessionError;
use super::plan::SessionBuilder;
use super::report::{DEFAULT_WEAKEST_LIMIT, build_summary};
use super::service::PracticeSession;

/// Result of answering a single question through the loop service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAnswerOutcome {
    pub attempt: QuestionAttempt,
    pub is_complete: bool,
    pub summary_id: Option<i64>,
}

/// Orchestrates session start and persisted answering.
///
/// The session state machine itself is synchronous and free of I/O; this
/// service owns the asynchronous edges: fetching the candidate pool and
/// mistake history at start, appending one attempt record per recorded
/// answer, and appending the summary once on completion.
#[derive(Clone)]
pub struct PracticeLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
    attempts: Arc<dyn AttemptRepository>,
    summaries: Arc<dyn SummaryRepository>,
    weakest_limit: usize,
}

impl PracticeLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionRepository>,
        attempts: Arc<dyn AttemptRepository>,
        summaries: Arc<dyn SummaryRepository>,
    ) -> Self {
        Self {
            clock,
            questions,
            attempts,
            summaries,
            weakest_limit: DEFAULT_WEAKEST_LIMIT,
        }
    }

    /// Override the size of the weakest-topics sub-list.
    #[must_use]
    pub fn with_weakest_limit(mut self, weakest_limit: usize) -> Self {
        self.weakest_limit = weakest_limit;
        self
    }

    /// Start a new session for the given configuration.
    ///
    /// Fetches the course/lesson-scoped candidate pool, and the user's missed
    /// question ids when the only-mistakes filter is on, then builds the
    /// session deterministically.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions survive filtering, or
    /// `SessionError::Storage` on repository failures.
    pub async fn start_session(
        &self,
        config: PracticeSessionConfig,
    ) -> Result<PracticeSession, SessionError> {
        let now = self.clock.now();
        let pool = self
            .questions
            .candidate_questions(config.course_id(), config.lesson_id())
            .await?;
        let missed = if config.filters().only_mistakes {
            self.attempts.missed_question_ids(config.course_id()).await?
        } else {
            HashSet::new()
        };

        let plan = SessionBuilder::new(&config).build(pool, &missed);
        PracticeSession::new(config, plan.questions, now)
    }

    /// Answer the current question, persist the attempt, and persist the
    /// summary when the session completes.
    ///
    /// If attempt persistence fails the answer stays recorded in the session;
    /// the pending record remains available from `session.attempts()`.
    ///
    /// # Errors
    ///
    /// Returns recorder errors (`Completed`, `Duplicate`, `OutOfSequence`)
    /// unchanged, or `SessionError::Storage` on persistence failures.
    pub async fn answer_current(
        &self,
        session: &mut PracticeSession,
        selected_option_id: OptionId,
    ) -> Result<SessionAnswerOutcome, SessionError> {
        let answered_at = self.clock.now();
        let Some(question_id) = session.current_question().map(Question::id) else {
            return Err(SessionError::Completed);
        };

        let attempt = session
            .record_answer(question_id, selected_option_id, answered_at)?
            .clone();
        self.attempts.append_attempt(&attempt).await?;

        if session.is_complete() && session.summary_id().is_none() {
            let summary = build_summary(session, self.weakest_limit)?;
            let summary_id = self
                .summaries
                .append_summary(session.config().course_id(), &summary)
                .await?;
            session.set_summary_id(summary_id);
        }

        Ok(SessionAnswerOutcome {
            attempt,
            is_complete: session.is_complete(),
            summary_id: session.summary_id(),
        })
    }

    /// Retry summary persistence after a completed session.
    ///
    /// This is useful when the final summary append failed (e.g. transient
    /// storage error).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotComplete` if the session is not finished,
    /// or `SessionError::Storage` if persistence fails.
    pub async fn finalize_summary(
        &self,
        session: &mut PracticeSession,
    ) -> Result<i64, SessionError> {
        if let Some(id) = session.summary_id() {
            return Ok(id);
        }
        if !session.is_complete() {
            return Err(SessionError::NotComplete);
        }

        let summary = build_summary(session, self.weakest_limit)?;
        let id = self
            .summaries
            .append_summary(session.config().course_id(), &summary)
            .await?;
        session.set_summary_id(id);
        Ok(id)
    }
}
