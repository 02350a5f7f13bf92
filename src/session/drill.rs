use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::session::DrillError;
use crate::session::settings::{OrderMode, SessionConfig};

/// Decides which question comes next across repeated passes.
///
/// A pass is exactly `count` questions. `next_index` returns `None` once
/// `pass_limit` passes have been handed out, and keeps returning `None`.
pub struct DrillState {
    count: usize,
    order: OrderMode,
    pass_limit: u32,
    no_repeat: bool,
    rng: SmallRng,
    /// Next index in linear order.
    cursor: usize,
    questions_asked: usize,
    loops_count: u32,
    used: HashSet<usize>,
    finished: bool,
}

impl DrillState {
    pub fn new(count: usize, config: &SessionConfig) -> Result<Self, DrillError> {
        if count == 0 {
            return Err(DrillError::EmptyQuestionSet);
        }
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(Self {
            count,
            order: config.order,
            pass_limit: config.pass_limit,
            no_repeat: config.no_repeat_within_pass,
            rng,
            cursor: 0,
            questions_asked: 0,
            loops_count: 0,
            used: HashSet::new(),
            finished: false,
        })
    }

    pub fn next_index(&mut self) -> Option<usize> {
        if self.finished {
            return None;
        }
        if self.questions_asked % self.count == 0 {
            self.loops_count += 1;
            self.used.clear();
            if self.loops_count > self.pass_limit {
                self.finished = true;
                return None;
            }
        }

        let index = match self.order {
            OrderMode::Linear => {
                let index = self.cursor;
                self.cursor = (self.cursor + 1) % self.count;
                index
            }
            OrderMode::Random => self.draw(),
        };
        if self.no_repeat {
            self.used.insert(index);
        }
        self.questions_asked += 1;
        Some(index)
    }

    // At most count-1 indices are used when this runs, so the loop ends.
    fn draw(&mut self) -> usize {
        loop {
            let index = self.rng.gen_range(0..self.count);
            if !self.no_repeat || !self.used.contains(&index) {
                return index;
            }
        }
    }

    /// Questions handed out so far, across all passes.
    pub fn questions_asked(&self) -> usize {
        self.questions_asked
    }

    /// Passes whose every question has been handed out.
    pub fn completed_passes(&self) -> u32 {
        let full = self.questions_asked / self.count;
        u32::try_from(full).unwrap_or(u32::MAX)
    }
}
