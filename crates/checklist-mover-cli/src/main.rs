use anyhow::{Context, Result, bail};
use checklist_mover_config::Config;
use checklist_mover_engine::{Processor, Report, io};
use clap::{Args, Parser, Subcommand, ValueEnum};
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "checklist-mover",
    about = "Move completed checklist items to the bottom of their list, or hide them",
    version
)]
struct Cli {
    /// Notes directory; overrides the config file.
    #[arg(long, global = true)]
    notes: Option<PathBuf>,
    /// State file; overrides the config file.
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    /// Enable verbose logging for debugging.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reorder completed items in the given documents.
    Move(MoveArgs),

    /// Flip the hide-completed setting, then reprocess FILE if given.
    ToggleHide {
        file: Option<PathBuf>,
    },

    /// Set the hide-completed setting.
    SetHide {
        #[arg(value_enum)]
        mode: HideMode,
    },

    /// Show the current setting and hidden items per document.
    Status,
}

#[derive(Debug, Args)]
struct MoveArgs {
    /// Markdown files, absolute or relative to the notes directory.
    #[arg(required_unless_present = "all")]
    files: Vec<PathBuf>,
    /// Process every markdown file under the notes directory.
    #[arg(long, conflicts_with = "files")]
    all: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HideMode {
    On,
    Off,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config = resolve_config(cli.notes, cli.state)?;
    let notes_root = config.notes_path.clone();
    let state_path = config.resolved_state_path();
    log::debug!(
        "notes: {}, state: {}",
        notes_root.display(),
        state_path.display()
    );

    let mut processor = Processor::open(notes_root.clone(), state_path.clone())
        .with_context(|| format!("Failed to open notes at '{}'", notes_root.display()))?;

    match cli.command {
        Commands::Move(args) => {
            let documents = if args.all {
                // Scanned paths are already relative to the notes root
                io::scan_markdown_files(&notes_root)?
                    .iter()
                    .map(|path| {
                        RelativePathBuf::from_path(path)
                            .with_context(|| format!("Invalid document path '{}'", path.display()))
                    })
                    .collect::<Result<Vec<_>>>()?
            } else {
                args.files
                    .iter()
                    .map(|path| to_document(path, &notes_root))
                    .collect::<Result<Vec<_>>>()?
            };
            move_documents(&mut processor, &documents)
        }
        Commands::ToggleHide { file } => {
            let document = file
                .as_deref()
                .map(|path| to_document(path, &notes_root))
                .transpose()?;
            let hide = processor
                .toggle_hide(document.as_deref())
                .context("Failed to toggle hide setting")?;
            println!("hide completed: {}", on_off(hide));
            Ok(())
        }
        Commands::SetHide { mode } => {
            let hide = matches!(mode, HideMode::On);
            processor
                .set_hide_completed(hide)
                .context("Failed to save hide setting")?;
            println!("hide completed: {}", on_off(hide));
            Ok(())
        }
        Commands::Status => {
            let state = processor.state();
            println!("hide completed: {}", on_off(state.settings.hide_completed));
            println!("state file: {}", state_path.display());
            if state.hidden.is_empty() {
                println!("no hidden items");
            }
            for (document, count) in state.hidden.documents() {
                println!("{document}: {count} hidden");
            }
            Ok(())
        }
    }
}

/// Notes and state paths from the command line, falling back to the config file.
fn resolve_config(notes: Option<PathBuf>, state: Option<PathBuf>) -> Result<Config> {
    let mut config = match notes {
        Some(notes_path) => Config::new(notes_path),
        None => match Config::load()? {
            Some(config) => config,
            None => bail!(
                "No notes directory given and no config file found.\n\
                 Pass --notes <DIR> or create a config file at {}",
                Config::config_path().display()
            ),
        },
    };

    if state.is_some() {
        config.state_path = state;
    }
    Ok(config)
}

/// Map a command-line path onto a document id relative to the notes root.
fn to_document(path: &Path, notes_root: &Path) -> Result<RelativePathBuf> {
    let relative = if path.is_absolute() || path.exists() {
        let absolute = path
            .canonicalize()
            .with_context(|| format!("File not found: '{}'", path.display()))?;
        let root = notes_root
            .canonicalize()
            .with_context(|| format!("Notes directory not found: '{}'", notes_root.display()))?;
        absolute
            .strip_prefix(&root)
            .with_context(|| {
                format!(
                    "'{}' is not inside the notes directory '{}'",
                    path.display(),
                    notes_root.display()
                )
            })?
            .to_path_buf()
    } else {
        path.to_path_buf()
    };

    RelativePathBuf::from_path(&relative)
        .with_context(|| format!("Invalid document path '{}'", relative.display()))
}

fn move_documents(processor: &mut Processor, documents: &[RelativePathBuf]) -> Result<()> {
    let mut failures = 0;

    for document in documents {
        match processor.move_completed(document) {
            Ok(report) => println!("{document}: {}", describe(&report)),
            Err(e) => {
                log::error!("{document}: {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} document(s) could not be processed");
    }
    Ok(())
}

fn describe(report: &Report) -> String {
    if report.skipped {
        return "skipped, already being processed".to_string();
    }
    if !report.written {
        return "unchanged".to_string();
    }
    format!(
        "moved {}, hidden {}, restored {}",
        report.moved, report.hidden, report.restored
    )
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
