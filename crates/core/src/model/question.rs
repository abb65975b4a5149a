use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{CourseId, LessonId, OptionId, QuestionId};

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Three-level difficulty label carried by every question.
///
/// Serialized in lowercase to match the catalog's wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QuestionError::InvalidDifficulty(other.to_string())),
        }
    }
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// Validated topic label (trimmed, non-empty).
///
/// Topics group questions for the per-topic performance breakdown; matching is
/// exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicName(String);

impl TopicName {
    /// Create a validated topic name.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::Empty` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TopicError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TopicError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic name cannot be empty")]
    Empty,
}

//
// ─── ANSWER OPTION ─────────────────────────────────────────────────────────────
//

/// One selectable answer within a question. Immutable once the question is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    id: OptionId,
    text: String,
}

impl AnswerOption {
    #[must_use]
    pub fn new(id: OptionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> OptionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated question data as supplied by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub course_id: CourseId,
    pub subject: String,
    pub topic: TopicName,
    pub difficulty: Difficulty,
    pub text: String,
    pub options: Vec<AnswerOption>,
    pub correct_option_id: OptionId,
    pub explanation: String,
    pub related_lesson_id: Option<LessonId>,
    pub published: bool,
}

impl QuestionDraft {
    /// Validate the draft into a `Question`.
    ///
    /// Enforces: non-empty question text, a non-empty option list with unique
    /// option ids and non-empty option texts, and a `correct_option_id` that
    /// references one of the contained options.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionError` encountered.
    pub fn validate(self, now: DateTime<Utc>) -> Result<Question, QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        for option in &self.options {
            if option.text().trim().is_empty() {
                return Err(QuestionError::EmptyOptionText(option.id()));
            }
            if !seen.insert(option.id()) {
                return Err(QuestionError::DuplicateOptionId(option.id()));
            }
        }
        if !seen.contains(&self.correct_option_id) {
            return Err(QuestionError::UnknownCorrectOption(self.correct_option_id));
        }

        Ok(Question {
            id: self.id,
            course_id: self.course_id,
            subject: self.subject,
            topic: self.topic,
            difficulty: self.difficulty,
            text: self.text,
            options: self.options,
            correct_option_id: self.correct_option_id,
            explanation: self.explanation,
            related_lesson_id: self.related_lesson_id,
            published: self.published,
            updated_at: now,
        })
    }
}

/// A validated bank question.
///
/// Fields are private so the option/correct-answer invariants hold for the
/// lifetime of the value; construct via `QuestionDraft::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    course_id: CourseId,
    subject: String,
    topic: TopicName,
    difficulty: Difficulty,
    text: String,
    options: Vec<AnswerOption>,
    correct_option_id: OptionId,
    explanation: String,
    related_lesson_id: Option<LessonId>,
    published: bool,
    updated_at: DateTime<Utc>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn topic(&self) -> &TopicName {
        &self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Ordered answer options, in display order.
    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_option_id(&self) -> OptionId {
        self.correct_option_id
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn related_lesson_id(&self) -> Option<LessonId> {
        self.related_lesson_id
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.published
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Grades a selected option against this question's answer key.
    ///
    /// An option id that does not belong to this question is simply incorrect.
    #[must_use]
    pub fn is_correct(&self, selected: OptionId) -> bool {
        self.correct_option_id == selected
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question must have at least one answer option")]
    NoOptions,

    #[error("answer option {0} has empty text")]
    EmptyOptionText(OptionId),

    #[error("duplicate answer option id {0}")]
    DuplicateOptionId(OptionId),

    #[error("correct option {0} is not among the question's options")]
    UnknownCorrectOption(OptionId),

    #[error("invalid difficulty value: {0}")]
    InvalidDifficulty(String),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            id: QuestionId::new(1),
            course_id: CourseId::new(10),
            subject: "Maths".to_string(),
            topic: TopicName::new("Fractions").unwrap(),
            difficulty: Difficulty::Easy,
            text: "What is 1/2 + 1/4?".to_string(),
            options: vec![
                AnswerOption::new(OptionId::new(1), "3/4"),
                AnswerOption::new(OptionId::new(2), "2/6"),
            ],
            correct_option_id: OptionId::new(1),
            explanation: "Bring both to quarters.".to_string(),
            related_lesson_id: None,
            published: true,
        }
    }

    #[test]
    fn valid_draft_validates() {
        let question = draft().validate(fixed_now()).unwrap();
        assert_eq!(question.id(), QuestionId::new(1));
        assert_eq!(question.options().len(), 2);
        assert_eq!(question.updated_at(), fixed_now());
        assert!(question.is_published());
    }

    #[test]
    fn empty_text_is_rejected() {
        let mut d = draft();
        d.text = "   ".to_string();
        let err = d.validate(fixed_now()).unwrap_err();
        assert!(matches!(err, QuestionError::EmptyText));
    }

    #[test]
    fn empty_option_list_is_rejected() {
        let mut d = draft();
        d.options.clear();
        let err = d.validate(fixed_now()).unwrap_err();
        assert!(matches!(err, QuestionError::NoOptions));
    }

    #[test]
    fn duplicate_option_ids_are_rejected() {
        let mut d = draft();
        d.options.push(AnswerOption::new(OptionId::new(2), "1/8"));
        let err = d.validate(fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            QuestionError::DuplicateOptionId(id) if id == OptionId::new(2)
        ));
    }

    #[test]
    fn correct_option_must_exist() {
        let mut d = draft();
        d.correct_option_id = OptionId::new(9);
        let err = d.validate(fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            QuestionError::UnknownCorrectOption(id) if id == OptionId::new(9)
        ));
    }

    #[test]
    fn grading_compares_against_answer_key() {
        let question = draft().validate(fixed_now()).unwrap();
        assert!(question.is_correct(OptionId::new(1)));
        assert!(!question.is_correct(OptionId::new(2)));
        // an id from another question is just wrong, not an error
        assert!(!question.is_correct(OptionId::new(99)));
    }

    #[test]
    fn topic_name_trims_and_rejects_empty() {
        assert_eq!(TopicName::new("  Algebra ").unwrap().as_str(), "Algebra");
        assert!(matches!(TopicName::new("  "), Err(TopicError::Empty)));
    }

    #[test]
    fn difficulty_parses_lowercase_labels() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        let err = "Hard".parse::<Difficulty>().unwrap_err();
        assert!(matches!(err, QuestionError::InvalidDifficulty(_)));
    }
}
