//! list-dolly: move Markdown list items between heading sections.
#![allow(clippy::multiple_crate_versions)]

use anyhow::{ensure, Context};
use clap::{Parser, Subcommand};
use list_dolly::config::Config;
use list_dolly::filter::{document_filter, filter_files, relative_path};
use list_dolly::formats::markdown::MarkdownFormat;
use list_dolly::input;
use list_dolly::mover::{FixedDestination, MoveOptions, Mover};
use list_dolly::picker::Picker;
use list_dolly::snapshot::StructuralSnapshot;
use list_dolly::store::{ConsoleNotifier, FsStore};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "list-dolly")]
#[command(about = "Move Markdown list items between heading sections", long_about = None)]
struct Args {
    /// Also print confirmations, not just warnings and errors
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Move the list item at a line to the end of a heading's section
    Move {
        /// File containing the list item
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Line of the list item (1-based); any line of the item or its sub-items works
        #[arg(long, short = 'l')]
        line: usize,

        /// Destination file; opens the interactive picker when omitted
        #[arg(long)]
        to: Option<PathBuf>,

        /// Heading to place the item under, created if missing (default: end of file)
        #[arg(long, requires = "to", conflicts_with = "new_heading")]
        heading: Option<String>,

        /// Create this heading at the end of the destination and place the item under it
        #[arg(long, requires = "to")]
        new_heading: Option<String>,

        /// Print a JSON report of the move
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        scope: Scope,
    },
    /// List the files a list item in SOURCE could be moved to
    Candidates {
        /// File the move would start from
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        #[command(flatten)]
        scope: Scope,
    },
    /// List the headings of a file
    Headings {
        /// File to outline
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(clap::Args)]
struct Scope {
    /// Directory to collect destination files from (default: the source's directory)
    #[arg(long)]
    vault: Option<PathBuf>,

    /// Destination filter regex, overriding the configured one
    #[arg(long)]
    pattern: Option<String>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,
}

impl Scope {
    fn root(&self, source: &Path) -> PathBuf {
        self.vault.clone().unwrap_or_else(|| {
            source
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        })
    }

    fn config(&self) -> Config {
        let mut cfg = Config::load();

        // Override config with command line args
        if let Some(pattern) = &self.pattern {
            cfg.file_regex_pattern.clone_from(pattern);
        }
        if !self.ext.is_empty() {
            cfg.file_extensions.clone_from(&self.ext);
        }
        cfg
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let format = MarkdownFormat;
    let notifier = ConsoleNotifier {
        verbose: args.verbose,
    };

    match args.command {
        Command::Move {
            source,
            line,
            to,
            heading,
            new_heading,
            json,
            scope,
        } => {
            ensure!(line > 0, "line numbers start at 1");
            let cfg = scope.config();
            let root = scope.root(&source);
            let documents = input::find_documents(&[root.clone()], &cfg.file_extensions)
                .with_context(|| format!("could not list documents under {}", root.display()))?;
            let options = MoveOptions {
                root,
                documents,
                global_pattern: cfg.file_regex_pattern,
            };

            let store = FsStore;
            let notifier = ConsoleNotifier {
                verbose: args.verbose || !json,
            };
            let mut mover = Mover::new(&store, &notifier, &format);
            let outcome = if let Some(file) = to {
                let mut chooser = FixedDestination {
                    file,
                    heading,
                    new_heading,
                };
                mover.run(&source, line - 1, &options, &mut chooser)
            } else {
                let mut chooser = Picker { format: &format };
                mover.run(&source, line - 1, &options, &mut chooser)
            };

            match outcome {
                Ok(Some(report)) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Ok(None) => Ok(ExitCode::SUCCESS),
                // Already reported by the mover.
                Err(_) => Ok(ExitCode::FAILURE),
            }
        }
        Command::Candidates { source, scope } => {
            let cfg = scope.config();
            let root = scope.root(&source);
            let text = fs::read_to_string(&source)
                .with_context(|| format!("could not read {}", source.display()))?;
            let documents = input::find_documents(&[root.clone()], &cfg.file_extensions)
                .with_context(|| format!("could not list documents under {}", root.display()))?;

            let filter = document_filter(&text, &cfg.file_regex_pattern, &notifier);
            for file in filter_files(&documents, &root, filter.as_ref()) {
                println!("{}", relative_path(&file, &root));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Headings { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("could not read {}", file.display()))?;
            let snapshot = StructuralSnapshot::parse(&text, &format)
                .with_context(|| format!("could not parse {}", file.display()))?;

            for heading in snapshot.headings {
                println!(
                    "{}{} (line {})",
                    "  ".repeat(heading.level - 1),
                    heading.title,
                    heading.span.start.line + 1
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
