mod attempt;
mod filters;
mod ids;
mod question;
mod summary;

pub use ids::{AttemptId, CourseId, LessonId, OptionId, ParseIdError, QuestionId};

pub use attempt::{QuestionAttempt, SessionAnswer};
pub use filters::{PracticeFilters, PracticeSessionConfig};
pub use question::{
    AnswerOption, Difficulty, Question, QuestionDraft, QuestionError, TopicError, TopicName,
};
pub use summary::{PracticeSessionSummary, SummaryError, TopicPerformance};
