use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::question::TopicName;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("correct count ({correct}) exceeds attempted count ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },

    #[error("per-topic totals ({sum}) do not match the answered count ({total})")]
    CountMismatch { total: u32, sum: u32 },
}

/// Integer percentage with round-half-up semantics; 0 when `total` is 0.
fn percentage(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct);
    let total = u64::from(total);
    // (100 * correct / total) rounded half-up, in integer arithmetic.
    let pct = (200 * correct + total) / (2 * total);
    u8::try_from(pct).unwrap_or(100)
}

//
// ─── TOPIC PERFORMANCE ─────────────────────────────────────────────────────────
//

/// Per-topic score over the answered questions of one session.
///
/// Recomputed fresh each time the session is aggregated; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPerformance {
    topic: TopicName,
    total: u32,
    correct: u32,
    percentage: u8,
}

impl TopicPerformance {
    /// Build a topic score from raw counts.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::CorrectExceedsTotal` if `correct > total`.
    pub fn new(topic: TopicName, total: u32, correct: u32) -> Result<Self, SummaryError> {
        if correct > total {
            return Err(SummaryError::CorrectExceedsTotal { correct, total });
        }
        Ok(Self {
            topic,
            total,
            correct,
            percentage: percentage(correct, total),
        })
    }

    #[must_use]
    pub fn topic(&self) -> &TopicName {
        &self.topic
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Correctness percentage, 0..=100, rounded half-up.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    /// A perfect topic is never "weak", whatever its count.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.percentage == 100
    }
}

//
// ─── SESSION SUMMARY ───────────────────────────────────────────────────────────
//

/// Immutable snapshot of a completed practice session.
///
/// Topics appear in first-encountered order. The weakest-topics sub-list is
/// sorted ascending by percentage, ties broken by descending attempt count
/// (more-attempted topics carry more statistical weight), perfect topics
/// excluded, and bounded by the caller's limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSessionSummary {
    total_questions: u32,
    correct_count: u32,
    percentage: u8,
    topics: Vec<TopicPerformance>,
    weakest_topics: Vec<TopicPerformance>,
}

impl PracticeSessionSummary {
    /// Rehydrate a summary from externally supplied totals.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::CorrectExceedsTotal` if the overall counts are
    /// inverted, or `SummaryError::CountMismatch` if the per-topic totals do
    /// not add up to the overall counts.
    pub fn from_parts(
        total_questions: u32,
        correct_count: u32,
        topics: Vec<TopicPerformance>,
        weakest_limit: usize,
    ) -> Result<Self, SummaryError> {
        if correct_count > total_questions {
            return Err(SummaryError::CorrectExceedsTotal {
                correct: correct_count,
                total: total_questions,
            });
        }
        let total_sum: u32 = topics.iter().map(TopicPerformance::total).sum();
        if total_sum != total_questions {
            return Err(SummaryError::CountMismatch {
                total: total_questions,
                sum: total_sum,
            });
        }
        let correct_sum: u32 = topics.iter().map(TopicPerformance::correct).sum();
        if correct_sum != correct_count {
            return Err(SummaryError::CountMismatch {
                total: correct_count,
                sum: correct_sum,
            });
        }

        let weakest_topics = select_weakest(&topics, weakest_limit);

        Ok(Self {
            total_questions,
            correct_count,
            percentage: percentage(correct_count, total_questions),
            topics,
            weakest_topics,
        })
    }

    /// Build a summary from a per-topic breakdown, deriving the overall totals.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError` if the breakdown is internally inconsistent.
    pub fn from_topics(
        topics: Vec<TopicPerformance>,
        weakest_limit: usize,
    ) -> Result<Self, SummaryError> {
        let total_questions = topics.iter().map(TopicPerformance::total).sum();
        let correct_count = topics.iter().map(TopicPerformance::correct).sum();
        Self::from_parts(total_questions, correct_count, topics, weakest_limit)
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Overall correctness percentage, rounded the same way as per-topic.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    /// Full breakdown, one entry per distinct topic, first-encountered order.
    #[must_use]
    pub fn topics(&self) -> &[TopicPerformance] {
        &self.topics
    }

    /// Lowest-scoring topics, used to drive review recommendations.
    #[must_use]
    pub fn weakest_topics(&self) -> &[TopicPerformance] {
        &self.weakest_topics
    }
}

fn select_weakest(topics: &[TopicPerformance], limit: usize) -> Vec<TopicPerformance> {
    let mut weakest: Vec<TopicPerformance> = topics
        .iter()
        .filter(|t| !t.is_perfect())
        .cloned()
        .collect();
    // stable sort keeps first-encountered order among full ties
    weakest.sort_by(|a, b| {
        a.percentage()
            .cmp(&b.percentage())
            .then_with(|| b.total().cmp(&a.total()))
    });
    weakest.truncate(limit);
    weakest
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
