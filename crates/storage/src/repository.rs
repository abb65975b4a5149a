use async_trait::async_trait;
use practice_core::model::{
    CourseId, LessonId, PracticeSessionSummary, Question, QuestionAttempt, QuestionId,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── REPOSITORY CONTRACTS ──────────────────────────────────────────────────────
//

/// Question catalog collaborator.
///
/// Supplies the candidate pool for a session, scoped to a course and
/// optionally to a single lesson. The pool may contain unpublished questions;
/// excluding them is the session engine's responsibility.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist or update a question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError>;

    /// Fetch the candidate pool for a course, optionally lesson-scoped.
    ///
    /// Order is deterministic for a given store state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures. An empty pool is not an
    /// error.
    async fn candidate_questions(
        &self,
        course_id: CourseId,
        lesson_id: Option<LessonId>,
    ) -> Result<Vec<Question>, StorageError>;
}

/// Attempt-history collaborator.
///
/// Receives one record per successfully recorded answer, in recording order,
/// and answers the "which questions has this user missed before" query behind
/// the only-mistakes filter.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Append one attempt record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append_attempt(&self, attempt: &QuestionAttempt) -> Result<(), StorageError>;

    /// Ids of questions with at least one incorrect attempt in this course.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn missed_question_ids(
        &self,
        course_id: CourseId,
    ) -> Result<HashSet<QuestionId>, StorageError>;
}

/// Store for completed session summaries.
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Append a completed summary, returning its row id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the summary cannot be stored.
    async fn append_summary(
        &self,
        course_id: CourseId,
        summary: &PracticeSessionSummary,
    ) -> Result<i64, StorageError>;

    /// Fetch a summary by row id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_summary(&self, id: i64) -> Result<PracticeSessionSummary, StorageError>;
}

//
// ─── IN-MEMORY IMPLEMENTATION ──────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Questions keep insertion order so candidate pools are deterministic.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
    attempts: Arc<Mutex<Vec<QuestionAttempt>>>,
    summaries: Arc<Mutex<Vec<(CourseId, PracticeSessionSummary)>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All attempts appended so far, in recording order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn recorded_attempts(&self) -> Result<Vec<QuestionAttempt>, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.iter_mut().find(|q| q.id() == question.id()) {
            Some(existing) => *existing = question.clone(),
            None => guard.push(question.clone()),
        }
        Ok(())
    }

    async fn candidate_questions(
        &self,
        course_id: CourseId,
        lesson_id: Option<LessonId>,
    ) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .filter(|q| q.course_id() == course_id)
            .filter(|q| lesson_id.is_none() || q.related_lesson_id() == lesson_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    async fn append_attempt(&self, attempt: &QuestionAttempt) -> Result<(), StorageError> {
        let mut guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(attempt.clone());
        Ok(())
    }

    async fn missed_question_ids(
        &self,
        course_id: CourseId,
    ) -> Result<HashSet<QuestionId>, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .filter(|a| a.course_id() == course_id && !a.is_correct())
            .map(QuestionAttempt::question_id)
            .collect())
    }
}

#[async_trait]
impl SummaryRepository for InMemoryRepository {
    async fn append_summary(
        &self,
        course_id: CourseId,
        summary: &PracticeSessionSummary,
    ) -> Result<i64, StorageError> {
        let mut guard = self
            .summaries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push((course_id, summary.clone()));
        i64::try_from(guard.len()).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn get_summary(&self, id: i64) -> Result<PracticeSessionSummary, StorageError> {
        let guard = self
            .summaries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let index = usize::try_from(id.checked_sub(1).ok_or(StorageError::NotFound)?)
            .map_err(|_| StorageError::NotFound)?;
        guard
            .get(index)
            .map(|(_, summary)| summary.clone())
            .ok_or(StorageError::NotFound)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use practice_core::model::{
        AnswerOption, CourseId, Difficulty, OptionId, QuestionDraft, TopicName,
    };
    use practice_core::time::fixed_now;

    fn build_question(id: u64, course: u64, lesson: Option<u64>) -> Question {
        QuestionDraft {
            id: QuestionId::new(id),
            course_id: CourseId::new(course),
            subject: "Test".to_string(),
            topic: TopicName::new("T").unwrap(),
            difficulty: Difficulty::Medium,
            text: format!("Q{id}"),
            options: vec![
                AnswerOption::new(OptionId::new(1), "a"),
                AnswerOption::new(OptionId::new(2), "b"),
            ],
            correct_option_id: OptionId::new(1),
            explanation: String::new(),
            related_lesson_id: lesson.map(LessonId::new),
            published: true,
        }
        .validate(fixed_now())
        .unwrap()
    }

    #[tokio::test]
    async fn candidate_pool_is_course_and_lesson_scoped() {
        let repo = InMemoryRepository::new();
        repo.upsert_question(&build_question(1, 1, None)).await.unwrap();
        repo.upsert_question(&build_question(2, 1, Some(5))).await.unwrap();
        repo.upsert_question(&build_question(3, 2, None)).await.unwrap();

        let pool = repo
            .candidate_questions(CourseId::new(1), None)
            .await
            .unwrap();
        assert_eq!(pool.len(), 2);

        let scoped = repo
            .candidate_questions(CourseId::new(1), Some(LessonId::new(5)))
            .await
            .unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].id(), QuestionId::new(2));
    }

    #[tokio::test]
    async fn upsert_replaces_in_place_and_keeps_order() {
        let repo = InMemoryRepository::new();
        repo.upsert_question(&build_question(1, 1, None)).await.unwrap();
        repo.upsert_question(&build_question(2, 1, None)).await.unwrap();
        repo.upsert_question(&build_question(1, 1, Some(9))).await.unwrap();

        let pool = repo
            .candidate_questions(CourseId::new(1), None)
            .await
            .unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].id(), QuestionId::new(1));
        assert_eq!(pool[0].related_lesson_id(), Some(LessonId::new(9)));
    }

    #[tokio::test]
    async fn missed_ids_come_from_incorrect_attempts() {
        let repo = InMemoryRepository::new();
        let course = CourseId::new(1);
        let wrong =
            QuestionAttempt::new(QuestionId::new(1), course, OptionId::new(2), false, fixed_now());
        let right =
            QuestionAttempt::new(QuestionId::new(2), course, OptionId::new(1), true, fixed_now());
        let other_course = QuestionAttempt::new(
            QuestionId::new(3),
            CourseId::new(2),
            OptionId::new(2),
            false,
            fixed_now(),
        );
        repo.append_attempt(&wrong).await.unwrap();
        repo.append_attempt(&right).await.unwrap();
        repo.append_attempt(&other_course).await.unwrap();

        let missed = repo.missed_question_ids(course).await.unwrap();
        assert_eq!(missed.len(), 1);
        assert!(missed.contains(&QuestionId::new(1)));
    }

    #[tokio::test]
    async fn summaries_round_trip_by_row_id() {
        let repo = InMemoryRepository::new();
        let summary = PracticeSessionSummary::from_topics(Vec::new(), 3).unwrap();
        let id = repo.append_summary(CourseId::new(1), &summary).await.unwrap();
        assert_eq!(id, 1);
        let fetched = repo.get_summary(id).await.unwrap();
        assert_eq!(fetched, summary);
        assert!(matches!(
            repo.get_summary(99).await.unwrap_err(),
            StorageError::NotFound
        ));
    }
}
