use std::io::{BufRead, Write};
use std::thread;

use crate::deck::QuestionBank;
use crate::pipeline::{DeliveryPipeline, RenderSettings};
use crate::session::DrillError;
use crate::session::drill::DrillState;
use crate::session::settings::SessionConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    PassLimitReached,
    /// The interactive input reached end of file before the last pass.
    InputClosed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionReport {
    /// Questions shown together with their answer.
    pub questions_asked: usize,
    pub passes_completed: u32,
    pub end: SessionEnd,
}

/// Drills `bank` until the pass limit is reached, rendering to `sink`.
///
/// In interactive mode one line is read from `input` between each question
/// and its answer. The sink is handed back once every pipeline stage is done.
pub fn run_session<R, W>(
    bank: &QuestionBank,
    config: &SessionConfig,
    mut input: R,
    sink: W,
) -> Result<(SessionReport, W), DrillError>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    let mut drill = DrillState::new(bank.count(), config)?;
    log::info!(
        "starting {} session: {} questions, {} passes",
        config.order.as_str(),
        bank.count(),
        config.pass_limit
    );

    let pipeline = DeliveryPipeline::start(
        sink,
        RenderSettings {
            question_count: bank.count(),
            pass_limit: config.pass_limit,
            color: config.color,
        },
    );
    let mut answered = 0;
    let outcome = drive(&mut drill, bank, config, &pipeline, &mut input, &mut answered);
    let rendered = pipeline.finish();

    // A render failure explains a closed pipeline better than the send error.
    let sink = rendered?;
    let end = outcome?;
    let report = SessionReport {
        questions_asked: answered,
        passes_completed: u32::try_from(answered / bank.count()).unwrap_or(u32::MAX),
        end,
    };
    log::info!("session over: {report:?}");
    Ok((report, sink))
}

fn drive<R: BufRead, W>(
    drill: &mut DrillState,
    bank: &QuestionBank,
    config: &SessionConfig,
    pipeline: &DeliveryPipeline<W>,
    input: &mut R,
    answered: &mut usize,
) -> Result<SessionEnd, DrillError>
where
    W: Write + Send + 'static,
{
    let mut line = String::new();
    while let Some(i) = drill.next_index() {
        let (mut question, mut answer) = (bank.question(i)?, bank.answer(i)?);
        if config.reversed {
            std::mem::swap(&mut question, &mut answer);
        }

        pipeline.send_question(question)?;
        if config.interactive {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                log::info!(
                    "input closed after {} questions, {} full passes, ending session early",
                    drill.questions_asked(),
                    drill.completed_passes()
                );
                return Ok(SessionEnd::InputClosed);
            }
            pipeline.send_command(line.trim_end_matches(['\r', '\n']))?;
        } else {
            thread::sleep(config.pause);
        }
        pipeline.send_answer(answer)?;
        *answered += 1;
    }
    Ok(SessionEnd::PassLimitReached)
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};
    use std::time::Duration;

    use super::*;
    use crate::session::settings::OrderMode;

    fn bank(n: usize) -> QuestionBank {
        let mut bank = QuestionBank::new();
        for i in 0..n {
            bank.add_entry(format!("Q{i}"), format!("A{i}"));
        }
        bank
    }

    fn linear(pass_limit: u32) -> SessionConfig {
        SessionConfig {
            order: OrderMode::Linear,
            pass_limit,
            pause: Duration::from_millis(1),
            ..SessionConfig::default()
        }
    }

    fn run(bank: &QuestionBank, config: &SessionConfig, input: &str) -> (SessionReport, String) {
        let (report, sink) =
            run_session(bank, config, Cursor::new(input.to_string()), Vec::new()).unwrap();
        (report, String::from_utf8(sink).unwrap())
    }

    #[test]
    fn test_empty_bank_is_refused() {
        let result = run_session(&QuestionBank::new(), &linear(1), io::empty(), Vec::new());
        assert!(matches!(result, Err(DrillError::EmptyQuestionSet)));
    }

    #[test]
    fn test_linear_session_renders_every_pass() {
        let (report, text) = run(&bank(2), &linear(2), "");
        assert_eq!(
            report,
            SessionReport {
                questions_asked: 4,
                passes_completed: 2,
                end: SessionEnd::PassLimitReached,
            }
        );
        let answers: Vec<&str> = text.lines().filter(|l| l.starts_with("     --> ")).collect();
        assert_eq!(
            answers,
            vec!["     --> A0", "     --> A1", "     --> A0", "     --> A1"]
        );
        assert!(text.contains("Loop (2/2)"));
        assert!(text.ends_with("Limit reached. Exiting. Number of loops set to: 2\n"));
    }

    #[test]
    fn test_reversed_session_swaps_texts() {
        let config = SessionConfig {
            reversed: true,
            ..linear(1)
        };
        let (_, text) = run(&bank(1), &config, "");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "A0");
        assert_eq!(lines[3], "     --> Q0");
    }

    #[test]
    fn test_interactive_session_consumes_one_line_per_question() {
        let config = SessionConfig {
            interactive: true,
            pause: Duration::from_secs(60),
            ..linear(2)
        };
        let (report, text) = run(&bank(3), &config, "\n\nnext\n\n\n\n");
        assert_eq!(report.questions_asked, 6);
        assert_eq!(report.end, SessionEnd::PassLimitReached);
        assert!(!text.contains("next"));
    }

    #[test]
    fn test_interactive_eof_ends_session_early() {
        let config = SessionConfig {
            interactive: true,
            ..linear(1)
        };
        let (report, text) = run(&bank(3), &config, "\n");
        assert_eq!(
            report,
            SessionReport {
                questions_asked: 1,
                passes_completed: 0,
                end: SessionEnd::InputClosed,
            }
        );
        assert!(text.contains("     --> A0"));
        assert!(text.trim_end().ends_with("Q1"));
        assert!(!text.contains("A1"));
        assert!(!text.contains("Limit reached"));
    }
}
