use std::time::Duration;

use crate::session::DrillError;

pub const DEFAULT_PAUSE: Duration = Duration::from_secs(2);
pub const DEFAULT_PASS_LIMIT: u32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderMode {
    /// Questions in deck order, wrapping around at the end of a pass.
    Linear,
    /// A uniformly drawn question at every step.
    #[default]
    Random,
}

impl OrderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderMode::Linear => "linear",
            OrderMode::Random => "random",
        }
    }
}

/// Options of one drill session, fixed before the first question is asked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Wait for a line of input between question and answer instead of sleeping.
    pub interactive: bool,
    pub pause: Duration,
    pub order: OrderMode,
    /// Show the stored answer as the question and the question as the answer.
    pub reversed: bool,
    pub pass_limit: u32,
    /// In random order, never ask the same question twice within a pass.
    pub no_repeat_within_pass: bool,
    /// Fixed seed for random order; entropy when `None`.
    pub seed: Option<u64>,
    pub color: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            interactive: false,
            pause: DEFAULT_PAUSE,
            order: OrderMode::default(),
            reversed: false,
            pass_limit: DEFAULT_PASS_LIMIT,
            no_repeat_within_pass: false,
            seed: None,
            color: false,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), DrillError> {
        if self.pass_limit == 0 {
            return Err(DrillError::InvalidPassLimit);
        }
        Ok(())
    }
}
