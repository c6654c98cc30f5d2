//! lvc - minimal local versioning.
//!
//! This is the main entry point for the lvc CLI.

mod logging;

use clap::{CommandFactory, Parser, Subcommand};
use lvc_snapshot::{Command, Dispatcher, LvcConfig, LvcError, Outcome};
use std::path::PathBuf;
use tracing::debug;

/// Exit status when no command is given.
const USAGE_EXIT_CODE: i32 = 2;

#[derive(Parser)]
#[command(name = "lvc")]
#[command(author, version, about = "Minimal local versioning with numbered snapshot folders", long_about = None)]
struct Cli {
    /// Enable verbose logging (to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "directory", global = true)]
    directory: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the version counter in the working directory
    Init,
    /// Copy the working directory into the next `Version N` folder
    Create,
    /// Turn a snapshot folder into a git repository
    Convert {
        /// Label of the snapshot folder, e.g. `3` for `Version 3`
        label: Option<String>,
    },
    /// Run a git subcommand inside a snapshot folder
    Git {
        /// Git subcommand to run, e.g. `status`
        subcommand: Option<String>,
        /// Label of the snapshot folder (defaults to the latest snapshot)
        label: Option<String>,
    },
    #[command(external_subcommand)]
    External(Vec<String>),
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Init => Command::Init,
            Commands::Create => Command::Create,
            Commands::Convert { label } => Command::Convert { label },
            Commands::Git { subcommand, label } => Command::Git { subcommand, label },
            Commands::External(args) => {
                Command::Unknown(args.into_iter().next().unwrap_or_default())
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let Some(command) = cli.command else {
        eprintln!("{}", Cli::command().render_help());
        std::process::exit(USAGE_EXIT_CODE);
    };

    match run(cli.directory, command.into()).await {
        Ok(outcome) => println!("{}", outcome),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(directory: Option<PathBuf>, command: Command) -> Result<Outcome, LvcError> {
    let root = match directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let (config, source) = LvcConfig::load(&root).await?;
    debug!(
        root = %root.display(),
        config = ?source,
        counter_file = %config.counter_file,
        "Loaded configuration"
    );

    Dispatcher::for_directory(root, config)
        .dispatch(command)
        .await
}
