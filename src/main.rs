use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repolens::cli::commands::analyze::AnalyzeOptions;
use repolens::config::OutputFormat;

#[derive(Parser)]
#[command(name = "repolens")]
#[command(
    version,
    about = "Language-aware repository summarizer for LLM context building"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a repository (local path or remote git URL)
    Analyze {
        #[arg(help = "Local path or git URL to analyze", default_value = ".")]
        source: String,

        #[arg(long, short, help = "Write the report to this file instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, short, help = "Report format: json, markdown, files")]
        format: Option<OutputFormat>,

        #[arg(long, help = "Maximum file-tree depth")]
        depth: Option<usize>,

        #[arg(long, help = "How many key components to report")]
        top: Option<usize>,

        #[arg(long = "no-tree", help = "Skip the file tree section")]
        no_tree: bool,

        #[arg(long = "no-deps", help = "Skip the dependency section")]
        no_dependencies: bool,

        #[arg(long = "no-patterns", help = "Skip the pattern section")]
        no_patterns: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(long, help = "Print as JSON instead of TOML")]
        json: bool,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
        #[arg(long, help = "Project name")]
        name: Option<String>,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Analyze {
            source,
            output,
            format,
            depth,
            top,
            no_tree,
            no_dependencies,
            no_patterns,
        } => {
            repolens::cli::commands::analyze::run(AnalyzeOptions {
                source,
                output,
                format,
                depth,
                top,
                no_tree,
                no_dependencies,
                no_patterns,
            })?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => {
                repolens::cli::commands::config::show(json)?;
            }
            ConfigAction::Path => {
                repolens::cli::commands::config::path()?;
            }
            ConfigAction::Init {
                global,
                force,
                name,
            } => {
                repolens::cli::commands::config::init(global, force, name.as_deref())?;
            }
        },
    }

    Ok(())
}
