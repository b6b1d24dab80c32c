//! lessonquiz CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lessonquiz", version, about = "Take module quizzes and report course progress")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select a module and take its quiz
    Take {
        /// Path to the course .toml file
        #[arg(long)]
        course: PathBuf,

        /// Module to open (defaults to the first module)
        #[arg(long)]
        module: Option<u64>,

        /// Answers as 1-based option numbers, "-" to skip (e.g. "2,1,-")
        #[arg(long)]
        answers: Option<String>,

        /// Also write the submitted quiz as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,

        /// Do not send progress reports
        #[arg(long)]
        offline: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the modules of a course
    Modules {
        /// Path to the course .toml file
        #[arg(long)]
        course: PathBuf,
    },

    /// Validate a course file
    Validate {
        /// Path to the course .toml file
        #[arg(long)]
        course: PathBuf,
    },

    /// Send one message to the course assistant
    Chat {
        /// The message to send
        #[arg(long)]
        message: String,

        /// Course title to give the assistant as context
        #[arg(long)]
        course: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example course
    Init,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lessonquiz=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            course,
            module,
            answers,
            html,
            offline,
            config,
        } => commands::take::execute(course, module, answers, html, offline, config).await,
        Commands::Modules { course } => commands::modules::execute(course),
        Commands::Validate { course } => commands::validate::execute(course),
        Commands::Chat {
            message,
            course,
            config,
        } => commands::chat::execute(message, course, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
