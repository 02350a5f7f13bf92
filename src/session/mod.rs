pub mod drill;
pub mod runner;
pub mod settings;

pub use drill::DrillState;
pub use runner::{SessionEnd, SessionReport, run_session};
pub use settings::{OrderMode, SessionConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrillError {
    #[error("number of questions is zero, check the deck and the selected topics")]
    EmptyQuestionSet,
    #[error("question index {index} out of range for {count} questions")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("pass limit must be at least 1")]
    InvalidPassLimit,
    #[error("delivery pipeline closed before the session ended")]
    PipelineClosed,
    #[error("{0} stage panicked")]
    StagePanicked(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
