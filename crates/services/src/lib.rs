#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use practice_core::Clock;
pub use sessions as session;

pub use error::SessionError;

pub use sessions::{
    DEFAULT_WEAKEST_LIMIT, PracticeLoopService, PracticeSession, SessionAnswerOutcome,
    SessionBuilder, SessionPlan, SessionProgress, aggregate_topics, build_summary, filter_pool,
};
