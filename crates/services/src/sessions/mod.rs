mod filter;
mod plan;
mod progress;
mod report;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use filter::filter_pool;
pub use plan::{SessionBuilder, SessionPlan};
pub use progress::SessionProgress;
pub use report::{DEFAULT_WEAKEST_LIMIT, aggregate_topics, build_summary};
pub use service::PracticeSession;
pub use workflow::{PracticeLoopService, SessionAnswerOutcome};
