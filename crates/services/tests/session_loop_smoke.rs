use std::sync::Arc;

use practice_core::model::{
    AnswerOption, CourseId, Difficulty, OptionId, PracticeFilters, PracticeSessionConfig,
    Question, QuestionDraft, QuestionId, TopicName,
};
use practice_core::time::fixed_now;
use services::{Clock, PracticeLoopService};
use storage::repository::{InMemoryRepository, QuestionRepository, SummaryRepository};

fn build_question(id: u64, topic: &str) -> Question {
    QuestionDraft {
        id: QuestionId::new(id),
        course_id: CourseId::new(1),
        subject: "Maths".to_string(),
        topic: TopicName::new(topic).unwrap(),
        difficulty: Difficulty::Medium,
        text: format!("Q{id}"),
        options: vec![
            AnswerOption::new(OptionId::new(1), "right"),
            AnswerOption::new(OptionId::new(2), "wrong"),
        ],
        correct_option_id: OptionId::new(1),
        explanation: String::new(),
        related_lesson_id: None,
        published: true,
    }
    .validate(fixed_now())
    .unwrap()
}

fn loop_service(repo: &InMemoryRepository) -> PracticeLoopService {
    PracticeLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
    )
}

#[tokio::test]
async fn session_loop_persists_attempts_and_summary() {
    let repo = InMemoryRepository::new();
    for (id, topic) in [(1, "A"), (2, "A"), (3, "B"), (4, "B")] {
        repo.upsert_question(&build_question(id, topic)).await.unwrap();
    }

    let loop_svc = loop_service(&repo);
    let config = PracticeSessionConfig::new(CourseId::new(1), PracticeFilters::none());
    let mut session = loop_svc.start_session(config).await.unwrap();
    assert_eq!(session.total_questions(), 4);

    // correctness [true, false, true, true]
    let picks = [
        OptionId::new(1),
        OptionId::new(2),
        OptionId::new(1),
        OptionId::new(1),
    ];
    let mut last = None;
    for pick in picks {
        last = Some(loop_svc.answer_current(&mut session, pick).await.unwrap());
    }

    let outcome = last.unwrap();
    assert!(outcome.is_complete);
    let summary_id = outcome.summary_id.expect("summary persisted");

    let summary = repo.get_summary(summary_id).await.unwrap();
    assert_eq!(summary.total_questions(), 4);
    assert_eq!(summary.correct_count(), 3);
    assert_eq!(summary.percentage(), 75);

    let weakest: Vec<_> = summary
        .weakest_topics()
        .iter()
        .map(|t| t.topic().as_str())
        .collect();
    assert_eq!(weakest, ["A"]);

    // one attempt record per answered question, in recording order
    let attempts = repo.recorded_attempts().unwrap();
    assert_eq!(attempts.len(), 4);
    let flags: Vec<_> = attempts.iter().map(|a| a.is_correct()).collect();
    assert_eq!(flags, [true, false, true, true]);
}

#[tokio::test]
async fn empty_pool_refuses_to_start() {
    let repo = InMemoryRepository::new();
    let loop_svc = loop_service(&repo);
    let config = PracticeSessionConfig::new(CourseId::new(1), PracticeFilters::none());
    let err = loop_svc.start_session(config).await.unwrap_err();
    assert!(matches!(err, services::SessionError::Empty));
}

#[tokio::test]
async fn finalize_summary_is_idempotent() {
    let repo = InMemoryRepository::new();
    repo.upsert_question(&build_question(1, "A")).await.unwrap();

    let loop_svc = loop_service(&repo);
    let config = PracticeSessionConfig::new(CourseId::new(1), PracticeFilters::none());
    let mut session = loop_svc.start_session(config).await.unwrap();
    let outcome = loop_svc
        .answer_current(&mut session, OptionId::new(1))
        .await
        .unwrap();
    let first = outcome.summary_id.unwrap();

    // already persisted, returns the same id without a second append
    let again = loop_svc.finalize_summary(&mut session).await.unwrap();
    assert_eq!(first, again);
}
