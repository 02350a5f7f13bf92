use std::io::{self, Write};
use std::sync::mpsc::Receiver;

use crossterm::style::Stylize;

use crate::pipeline::Delivery;

pub const ANSWER_PREFIX: &str = "     --> ";
pub const SEPARATOR: &str = "---------------------------";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// Questions in one pass.
    pub question_count: usize,
    pub pass_limit: u32,
    pub color: bool,
}

/// Writes prompts to the sink and keeps its own count of passes.
///
/// Every `2 × question_count` prompts close a pass. Commands are not
/// prompts and never move the counter.
pub struct Renderer<W> {
    out: W,
    settings: RenderSettings,
    items_read: usize,
    current_loop: u32,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, settings: RenderSettings) -> Self {
        Self {
            out,
            settings,
            items_read: 0,
            current_loop: 0,
        }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.out, "Nb of questions: {}", self.settings.question_count)?;
        self.out.flush()
    }

    /// Opens the next pass. Returns `false` once the pass limit is exceeded,
    /// after writing the limit line.
    pub fn begin_pass(&mut self) -> io::Result<bool> {
        self.current_loop += 1;
        let limit = self.settings.pass_limit;
        if self.current_loop > limit {
            writeln!(
                self.out,
                "Limit reached. Exiting. Number of loops set to: {limit}"
            )?;
            self.out.flush()?;
            return Ok(false);
        }
        let banner = format!("Loop ({}/{limit})", self.current_loop);
        if self.settings.color {
            writeln!(self.out, "{}", banner.blue().bold())?;
        } else {
            writeln!(self.out, "{banner}")?;
        }
        self.out.flush()?;
        Ok(true)
    }

    /// Renders one delivery. Returns `false` when the pass limit is reached.
    pub fn render(&mut self, delivery: Delivery) -> io::Result<bool> {
        match delivery {
            Delivery::Command(line) => {
                log::debug!("command received: {line:?}");
                return Ok(true);
            }
            Delivery::Question(text) => {
                writeln!(self.out, "{text}")?;
            }
            Delivery::Answer(text) => {
                writeln!(self.out, "{ANSWER_PREFIX}{text}")?;
                writeln!(self.out, "{SEPARATOR}")?;
            }
        }
        self.out.flush()?;
        self.items_read += 1;
        let per_pass = 2 * self.settings.question_count.max(1);
        if self.items_read % per_pass == 0 {
            return self.begin_pass();
        }
        Ok(true)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Consumes the publish channel until the pass limit is reached or every
/// producer is gone.
pub fn render_stage<W: Write>(
    source: Receiver<Delivery>,
    out: W,
    settings: RenderSettings,
) -> io::Result<W> {
    let mut renderer = Renderer::new(out, settings);
    renderer.write_header()?;
    if !renderer.begin_pass()? {
        return Ok(renderer.into_inner());
    }
    for delivery in source {
        if !renderer.render(delivery)? {
            break;
        }
    }
    Ok(renderer.into_inner())
}
