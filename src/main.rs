use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "studyquest")]
#[command(about = "StudyQuest - XP, levels, achievements and daily challenges for your study plan")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.studyquest/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the progress database (overrides the config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, XP, achievements and today's challenges
    Status {
        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a task snapshot (JSON: {"completed_tasks_count": N, "tasks": [...]})
    Tasks {
        /// Snapshot file
        file: PathBuf,
    },

    /// Record a finished focus session
    Focus {
        /// Session length in minutes
        minutes: u32,

        /// Local start time (HH:MM, defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Record newly created flashcards
    Flashcards {
        /// Number of flashcards created
        count: u32,
    },

    /// Record a quiz result
    Quiz {
        /// Score in percent (0-100)
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        score: u8,
    },

    /// Claim a daily challenge whose goal has been reached
    Claim {
        /// Challenge number (1-3)
        id: u32,
    },

    /// Reset all progress (XP, stats, achievements, challenges)
    Reset {
        /// Actually perform the reset
        #[arg(long)]
        force: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Run the progress service and print events until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Init must work even when the existing config does not parse
    if let Some(Commands::Init { force }) = cli.command {
        return cli::init::init_command(cli.config.as_deref(), force);
    }

    let ctx = cli::CliContext::load(cli.config.as_deref(), cli.db)?;

    match cli.command {
        Some(Commands::Status { json }) => {
            cli::status::status_command(&ctx, json)?;
        }
        Some(Commands::Tasks { file }) => {
            cli::record::tasks_command(&ctx, &file)?;
        }
        Some(Commands::Focus { minutes, at }) => {
            cli::record::focus_command(&ctx, minutes, at.as_deref())?;
        }
        Some(Commands::Flashcards { count }) => {
            cli::record::flashcards_command(&ctx, count)?;
        }
        Some(Commands::Quiz { score }) => {
            cli::record::quiz_command(&ctx, score)?;
        }
        Some(Commands::Claim { id }) => {
            cli::record::claim_command(&ctx, id)?;
        }
        Some(Commands::Reset { force }) => {
            cli::record::reset_command(&ctx, force)?;
        }
        Some(Commands::Init { .. }) => {}
        Some(Commands::Watch) => {
            cli::watch::watch_command(&ctx).await?;
        }
        None => {
            cli::status::status_command(&ctx, false)?;
        }
    }

    Ok(())
}
