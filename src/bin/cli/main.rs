mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "belajar-cli", about = "Study flashcards and quizzes from the terminal", version)]
struct Cli {
    /// Config file (default: <config dir>/belajar-seru/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content root holding <grade>/<subject>/<topic> folders
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Directory for the progress store
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List topics with their flashcard and quiz sets
    Topics {
        /// Only topics of this grade
        #[arg(long)]
        grade: Option<String>,
        /// Only topics of this subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Study a flashcard set
    Flashcards {
        /// Topic key (grade/subject/topic) or title, case-insensitive prefix match
        topic: String,
        /// Flashcard set id (defaults to the first set)
        #[arg(long)]
        set: Option<String>,
    },

    /// Take a quiz
    Quiz {
        /// Topic key (grade/subject/topic) or title, case-insensitive prefix match
        topic: String,
        /// Quiz set id (defaults to the first set)
        #[arg(long)]
        set: Option<String>,
    },

    /// Show recorded quiz results
    Progress {
        /// Only results for this topic
        topic: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    let mut app = app::App::new(
        cli.config.as_deref(),
        cli.content.clone(),
        cli.data_dir.clone(),
    )?;

    match cli.command {
        None => {
            commands::topics::run(&app, None, None, &cli.format, use_color)?;
        }
        Some(Command::Topics { grade, subject }) => {
            commands::topics::run(
                &app,
                grade.as_deref(),
                subject.as_deref(),
                &cli.format,
                use_color,
            )?;
        }
        Some(Command::Flashcards { topic, set }) => {
            let stdin = std::io::stdin();
            commands::flashcards::run(
                &app,
                &topic,
                set.as_deref(),
                &mut stdin.lock(),
                &mut std::io::stdout(),
                use_color,
            )?;
        }
        Some(Command::Quiz { topic, set }) => {
            let stdin = std::io::stdin();
            commands::quiz::run(
                &mut app,
                &topic,
                set.as_deref(),
                &mut stdin.lock(),
                &mut std::io::stdout(),
                use_color,
            )?;
        }
        Some(Command::Progress { topic }) => {
            commands::progress::run(&app, topic.as_deref(), &cli.format, use_color)?;
        }
    }

    Ok(())
}
