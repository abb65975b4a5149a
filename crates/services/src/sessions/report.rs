use std::collections::HashMap;

use practice_core::model::{PracticeSessionSummary, TopicName, TopicPerformance};

use crate::error::SessionError;
use super::service::PracticeSession;

/// Default size of the weakest-topics sub-list.
pub const DEFAULT_WEAKEST_LIMIT: usize = 3;

/// Fold the session's recorded answers into one `TopicPerformance` per
/// distinct topic, in first-encountered order.
///
/// Only answered questions contribute; a question the cursor never reached is
/// excluded from aggregation.
///
/// # Errors
///
/// Returns `SessionError::NotComplete` if the session has not been finished.
pub fn aggregate_topics(
    session: &PracticeSession,
) -> Result<Vec<TopicPerformance>, SessionError> {
    if !session.is_complete() {
        return Err(SessionError::NotComplete);
    }

    let mut order: Vec<TopicName> = Vec::new();
    let mut counts: HashMap<TopicName, (u32, u32)> = HashMap::new();

    for question in session.questions() {
        let Some(answer) = session.answer_for(question.id()) else {
            continue;
        };
        let topic = question.topic();
        let (total, correct) = counts.entry(topic.clone()).or_insert_with(|| {
            order.push(topic.clone());
            (0, 0)
        });
        *total += 1;
        if answer.is_correct {
            *correct += 1;
        }
    }

    order
        .into_iter()
        .map(|topic| {
            let (total, correct) = counts[&topic];
            TopicPerformance::new(topic, total, correct).map_err(SessionError::from)
        })
        .collect()
}

/// Compose the externally consumed summary for a completed session.
///
/// Overall totals use the same round-half-up percentage as the per-topic
/// entries; `weakest_limit` bounds the weakest-topics sub-list.
///
/// # Errors
///
/// Returns `SessionError::NotComplete` on an unfinished session, or
/// `SessionError::Summary` if the aggregated counts are inconsistent.
pub fn build_summary(
    session: &PracticeSession,
    weakest_limit: usize,
) -> Result<PracticeSessionSummary, SessionError> {
    let topics = aggregate_topics(session)?;
    Ok(PracticeSessionSummary::from_topics(topics, weakest_limit)?)
}
