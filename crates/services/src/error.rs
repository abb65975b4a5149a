//! Shared error types for the services crate.

use thiserror::Error;

use practice_core::model::{QuestionId, SummaryError};
use storage::repository::StorageError;

/// Errors emitted by the practice session engine.
///
/// All variants indicate a sequencing or availability problem on the caller's
/// side, not a transient fault; none of them is retried internally and no
/// rejected operation mutates session state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,

    #[error("session already completed")]
    Completed,

    #[error("answer for question {got} while question {expected} is current")]
    OutOfSequence {
        expected: QuestionId,
        got: QuestionId,
    },

    #[error("question {0} already has a recorded answer")]
    Duplicate(QuestionId),

    #[error("session is not complete")]
    NotComplete,

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
