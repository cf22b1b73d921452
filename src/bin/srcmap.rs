//! srcmap CLI - Generate a markdown source map of a project.

use std::io::Write;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use serde::Serialize;
use srcmap::builder::{default_project_root, SourceMap};
use srcmap::config::GeneratorConfig;
use srcmap::errors::{exit_code, SrcmapError};
use srcmap::report::{write_progress, write_summary};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "srcmap")]
#[command(about = "Generate a markdown source map of a project")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the source directory and write its README.md source map
    Generate {
        /// Project root (defaults to the project srcmap was built from)
        #[arg(long)]
        project_root: Option<PathBuf>,

        /// Config file (defaults to srcmap.toml in the project root, if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the document instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Enable debug logging on stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let (json_output, verbose) = match &cli.command {
        Commands::Generate { json, verbose, .. } => (*json, *verbose),
        Commands::Completions { .. } => (false, false),
    };
    init_logging(verbose);

    let result = match cli.command {
        Commands::Generate {
            project_root,
            config,
            dry_run,
            json,
            ..
        } => run_generate(project_root, config, dry_run, json),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "srcmap", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "srcmap failed");
        if json_output {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }

            let payload = ErrorOutput {
                error: e.to_string(),
            };

            let json = serde_json::to_string(&payload)
                .unwrap_or_else(|_| "{\"error\":\"serialization failed\"}".to_string());
            eprintln!("{json}");
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(exit_code(&e));
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// --- Generate command ---

fn run_generate(
    project_root: Option<PathBuf>,
    config_path: Option<PathBuf>,
    dry_run: bool,
    json: bool,
) -> Result<(), SrcmapError> {
    let project_root = project_root.unwrap_or_else(default_project_root);
    let config = match config_path {
        Some(path) => GeneratorConfig::load(&path)?,
        None => GeneratorConfig::discover(&project_root)?,
    };

    let source_map = SourceMap::new(&project_root).config(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if !json && !dry_run {
        write_progress(&mut out, &source_map.output_path())?;
    }

    let result = source_map.build()?;

    let summary = if dry_run {
        result.summary(false)
    } else {
        result.write()?
    };

    if json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| SrcmapError::Io(std::io::Error::other(e.to_string())))?;
        writeln!(out, "{json}")?;
    } else if dry_run {
        writeln!(out, "{}", result.document)?;
    } else {
        write_summary(&mut out, &summary)?;
    }

    Ok(())
}
