pub mod render;

use std::io::Write;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use crate::session::DrillError;

pub use render::{RenderSettings, Renderer};

/// Everything that travels on the publish channel towards the render stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Question(String),
    Answer(String),
    /// A pacing line typed by the user.
    Command(String),
}

/// Question/answer and command streams fanned into one render stage.
///
/// All channels are rendezvous channels: a send returns once the next stage
/// has taken the item, so sleeping or waiting in the producer holds the
/// output back in real time instead of letting it queue up.
pub struct DeliveryPipeline<W> {
    prompts: SyncSender<Delivery>,
    commands: SyncSender<String>,
    prompt_merge: JoinHandle<()>,
    command_merge: JoinHandle<()>,
    render: JoinHandle<std::io::Result<W>>,
}

impl<W: Write + Send + 'static> DeliveryPipeline<W> {
    pub fn start(sink: W, settings: RenderSettings) -> Self {
        let (prompts, prompt_rx) = mpsc::sync_channel::<Delivery>(0);
        let (commands, command_rx) = mpsc::sync_channel::<String>(0);
        let (publish, publish_rx) = mpsc::sync_channel::<Delivery>(0);

        // The merge stages own the only publish senders, so the render stage
        // sees the channel close once both of them are done.
        let prompt_merge = {
            let publish = publish.clone();
            thread::spawn(move || merge_stage(prompt_rx, publish, Some))
        };
        let command_merge = thread::spawn(move || {
            merge_stage(command_rx, publish, |line: String| {
                (!line.is_empty()).then_some(Delivery::Command(line))
            })
        });
        let render = thread::spawn(move || render::render_stage(publish_rx, sink, settings));

        Self {
            prompts,
            commands,
            prompt_merge,
            command_merge,
            render,
        }
    }

    pub fn send_question(&self, text: &str) -> Result<(), DrillError> {
        log::debug!("pushing question {text:?}");
        self.prompts
            .send(Delivery::Question(text.to_string()))
            .map_err(|_| DrillError::PipelineClosed)
    }

    pub fn send_answer(&self, text: &str) -> Result<(), DrillError> {
        self.prompts
            .send(Delivery::Answer(text.to_string()))
            .map_err(|_| DrillError::PipelineClosed)
    }

    pub fn send_command(&self, line: &str) -> Result<(), DrillError> {
        self.commands
            .send(line.to_string())
            .map_err(|_| DrillError::PipelineClosed)
    }

    /// Closes both input streams, waits for every stage and hands the sink
    /// back.
    pub fn finish(self) -> Result<W, DrillError> {
        let Self {
            prompts,
            commands,
            prompt_merge,
            command_merge,
            render,
        } = self;
        drop(prompts);
        drop(commands);

        prompt_merge
            .join()
            .map_err(|_| DrillError::StagePanicked("question merge"))?;
        command_merge
            .join()
            .map_err(|_| DrillError::StagePanicked("command merge"))?;
        let sink = render
            .join()
            .map_err(|_| DrillError::StagePanicked("render"))??;
        Ok(sink)
    }
}

fn merge_stage<T, F>(source: Receiver<T>, publish: SyncSender<Delivery>, wrap: F)
where
    F: Fn(T) -> Option<Delivery>,
{
    for item in source {
        // A failed send means the render stage already stopped on its own
        // limit check.
        if let Some(delivery) = wrap(item)
            && publish.send(delivery).is_err()
        {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(question_count: usize, pass_limit: u32) -> RenderSettings {
        RenderSettings {
            question_count,
            pass_limit,
            color: false,
        }
    }

    fn rendered(sink: Vec<u8>) -> Vec<String> {
        String::from_utf8(sink)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_pipeline_renders_prompts_in_order() {
        let pipeline = DeliveryPipeline::start(Vec::new(), settings(2, 1));
        pipeline.send_question("Q0").unwrap();
        pipeline.send_answer("A0").unwrap();
        pipeline.send_question("Q1").unwrap();
        pipeline.send_answer("A1").unwrap();
        let lines = rendered(pipeline.finish().unwrap());
        assert_eq!(
            lines,
            vec![
                "Nb of questions: 2",
                "Loop (1/1)",
                "Q0",
                "     --> A0",
                "---------------------------",
                "Q1",
                "     --> A1",
                "---------------------------",
                "Limit reached. Exiting. Number of loops set to: 1",
            ]
        );
    }

    #[test]
    fn test_commands_do_not_break_alternation() {
        let pipeline = DeliveryPipeline::start(Vec::new(), settings(1, 1));
        pipeline.send_question("Q0").unwrap();
        pipeline.send_command("typed text").unwrap();
        pipeline.send_command("").unwrap();
        pipeline.send_answer("A0").unwrap();
        let lines = rendered(pipeline.finish().unwrap());
        assert_eq!(lines[2], "Q0");
        assert_eq!(lines[3], "     --> A0");
        assert!(!lines.iter().any(|l| l.contains("typed text")));
        assert!(lines.last().unwrap().starts_with("Limit reached"));
    }

    #[test]
    fn test_empty_answer_still_closes_its_pair() {
        let pipeline = DeliveryPipeline::start(Vec::new(), settings(2, 1));
        pipeline.send_question("Q0").unwrap();
        pipeline.send_answer("").unwrap();
        pipeline.send_question("Q1").unwrap();
        pipeline.send_answer("A1").unwrap();
        let lines = rendered(pipeline.finish().unwrap());
        assert_eq!(lines[3], "     --> ");
        assert_eq!(lines[5], "Q1");
        assert_eq!(lines[6], "     --> A1");
        assert!(lines.last().unwrap().starts_with("Limit reached"));
    }

    #[test]
    fn test_early_close_stops_render_without_limit_line() {
        let pipeline = DeliveryPipeline::start(Vec::new(), settings(3, 2));
        pipeline.send_question("Q0").unwrap();
        let lines = rendered(pipeline.finish().unwrap());
        assert_eq!(lines, vec!["Nb of questions: 3", "Loop (1/2)", "Q0"]);
    }
}
