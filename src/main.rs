use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use qadrill::config::Config;
use qadrill::deck::TopicIndex;
use qadrill::deck::assets::{DEMO_DECK, load_bundled};
use qadrill::deck::parser::parse_deck_file;
use qadrill::deck::selection::parse_lesson_series;
use qadrill::session::{OrderMode, SessionEnd, run_session};

#[derive(Parser)]
#[command(
    name = "qadrill",
    version,
    about = "Drill yourself on question/answer decks by repetition"
)]
struct Cli {
    #[arg(
        help = "Deck file: '### <topic>' lines open topics, other lines are 'question;answer'",
        required_unless_present_any = ["demo", "init_config"]
    )]
    file: Option<PathBuf>,

    #[arg(long, conflicts_with = "file", help = "Drill the bundled demo deck")]
    demo: bool,

    #[arg(
        short,
        long,
        help = "Press Return to reveal each answer instead of waiting"
    )]
    interactive: bool,

    #[arg(
        short,
        long,
        value_name = "MS",
        help = "Milliseconds to wait before showing the answer"
    )]
    time: Option<u64>,

    #[arg(long, help = "Ask questions in deck order instead of randomly")]
    linear: bool,

    #[arg(short, long, help = "Swap questions and answers")]
    reversed: bool,

    #[arg(long = "loop", value_name = "N", help = "Number of passes over the questions")]
    loops: Option<u32>,

    #[arg(long, help = "In random order, ask every question once per pass")]
    no_repeat: bool,

    #[arg(long, help = "Seed for random order, to replay a session")]
    seed: Option<u64>,

    #[arg(
        short = 'l',
        long,
        value_delimiter = ',',
        help = "Comma-separated topics to drill (default: all)"
    )]
    topics: Vec<String>,

    #[arg(
        long,
        value_name = "SERIES",
        conflicts_with = "topics",
        help = "Numbered lessons to drill, e.g. 1:3,5"
    )]
    lessons: Option<String>,

    #[arg(short, long, help = "List the topics of the deck and exit")]
    summary: bool,

    #[arg(long, value_name = "PATH", help = "Config file to use instead of the default one")]
    config: Option<PathBuf>,

    #[arg(long, help = "Disable ANSI colors")]
    no_color: bool,

    #[arg(long, help = "Write the effective config to the config file and exit")]
    init_config: bool,
}

/// What the invocation asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Summary,
    Drill(OrderMode),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)?;
    apply_overrides(&mut config, &cli);

    if cli.init_config {
        config
            .save_to(&config_path)
            .with_context(|| format!("failed to write config {}", config_path.display()))?;
        println!("Config written to {}", config_path.display());
        return Ok(());
    }

    let (mut index, source) = load_deck(&cli, &config)?;

    let action = if cli.summary {
        Action::Summary
    } else if config.linear {
        Action::Drill(OrderMode::Linear)
    } else {
        Action::Drill(OrderMode::Random)
    };

    match action {
        Action::Summary => {
            print_summary(&index, &mut io::stdout().lock())?;
        }
        Action::Drill(order) => {
            let topics = selected_topics(&cli, &index)?;
            if topics.is_empty() {
                log::info!("no topic supplied, drilling all of them");
            }
            let bank = index.build_flat_set(&topics);

            let mut session = config.session();
            session.order = order;
            session.seed = cli.seed;
            session.color = use_color(&config, io::stdout().is_terminal());

            let (report, _) = run_session(&bank, &session, io::stdin().lock(), io::stdout())
                .with_context(|| format!("drill on {source} failed"))?;
            match report.end {
                SessionEnd::PassLimitReached => println!("Session is over..."),
                SessionEnd::InputClosed => println!(
                    "Input closed after {} questions. Session is over...",
                    report.questions_asked
                ),
            }
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    config.interactive |= cli.interactive;
    config.linear |= cli.linear;
    config.reversed |= cli.reversed;
    config.no_repeat |= cli.no_repeat;
    if cli.no_color {
        config.color = false;
    }
    if let Some(ms) = cli.time {
        config.pause_ms = ms;
    }
    if let Some(loops) = cli.loops {
        config.pass_limit = loops;
    }
}

/// Styling is only worth it on a terminal; piped output stays plain.
fn use_color(config: &Config, stdout_is_terminal: bool) -> bool {
    config.color && stdout_is_terminal
}

fn load_deck(cli: &Cli, config: &Config) -> Result<(TopicIndex, String)> {
    if cli.demo {
        let index = load_bundled(DEMO_DECK).context("failed to load the bundled demo deck")?;
        return Ok((index, "the demo deck".to_string()));
    }
    let path = cli
        .file
        .as_ref()
        .context("a deck file or --demo is required")?;
    let index = parse_deck_file(path, &config.deck_format())
        .with_context(|| format!("failed to parse deck {}", path.display()))?;
    Ok((index, path.display().to_string()))
}

fn selected_topics(cli: &Cli, index: &TopicIndex) -> Result<Vec<String>> {
    if let Some(series) = &cli.lessons {
        let numbers = parse_lesson_series(series)?;
        return Ok(index.resolve_lessons(&numbers)?);
    }
    Ok(cli.topics.iter().map(|t| t.trim().to_string()).collect())
}

fn print_summary<W: Write>(index: &TopicIndex, out: &mut W) -> io::Result<()> {
    if index.is_empty() {
        writeln!(out, "No topic found in this file")?;
        return Ok(());
    }
    if let Some(languages) = index.languages() {
        writeln!(out, "Languages: {} -> {}", languages.native, languages.learnt)?;
    }
    writeln!(out, "List of topics:")?;
    writeln!(out, "===============")?;
    for name in index.names() {
        let count = index.get(name).map_or(0, |bank| bank.count());
        let label = if name.is_empty() { "(untitled)" } else { name };
        writeln!(out, "  * {label} ({count} questions)")?;
    }
    Ok(())
}
