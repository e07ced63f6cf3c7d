//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::destination::Destination;
use super::output::Output;
use crate::config::Config;
use crate::export::Exporter;
use crate::outline::Outline;
use crate::source::ThingsDatabase;

#[derive(Parser)]
#[command(name = "things2taskpaper")]
#[command(
    author,
    version,
    about = "Convert a Things 3 database to an OmniFocus-ready TaskPaper outline"
)]
pub struct Cli {
    /// Copy the document to the clipboard instead of printing it
    #[arg(long, overrides_with = "no_write_to_clipboard")]
    pub write_to_clipboard: bool,

    /// Print the document even if the config asks for the clipboard
    #[arg(long, overrides_with = "write_to_clipboard")]
    pub no_write_to_clipboard: bool,

    /// Things database to read instead of the default location
    #[arg(long, env = "THINGS_DATABASE")]
    pub database: Option<PathBuf>,

    /// Sort each project's direct to-dos by their Things index
    #[arg(long, overrides_with = "no_sort_direct_todos")]
    pub sort_direct_todos: bool,

    /// Keep each project's direct to-dos in query order
    #[arg(long, overrides_with = "sort_direct_todos")]
    pub no_sort_direct_todos: bool,

    /// Configuration file to use instead of the default one
    #[arg(long, env = "THINGS_TASKPAPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Export only these items (to-dos, projects or areas), in this order
    pub uuids: Vec<String>,
}

impl Cli {
    /// Applies command-line flags on top of the loaded configuration
    fn merge_into(&self, mut config: Config) -> Config {
        if self.database.is_some() {
            config.database = self.database.clone();
        }
        if let Some(on) = switch(self.write_to_clipboard, self.no_write_to_clipboard) {
            config.write_to_clipboard = on;
        }
        if let Some(on) = switch(self.sort_direct_todos, self.no_sort_direct_todos) {
            config.sort_direct_todos = on;
        }
        config
    }
}

/// Reads a `--flag` / `--no-flag` pair; `None` leaves the config value alone
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.verbose);

    output.verbose("things2taskpaper starting");

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let config = cli.merge_into(config);
    output.verbose_ctx("config", &format!("{:?}", config));

    let database = open_database(&output, config.database.as_deref())?;
    let outline = Outline::with_options(&database, config.outline_options());

    if cli.uuids.is_empty() {
        output.verbose_ctx("export", "Exporting the whole database");
    } else {
        output.verbose_ctx("export", &format!("Exporting {} item(s)", cli.uuids.len()));
    }
    let export = Exporter::new(&outline).export(&cli.uuids)?;

    for warning in &export.warnings {
        output.warn(&warning.to_string());
    }

    let destination = Destination::from_flag(config.write_to_clipboard);
    output.verbose_ctx(
        "export",
        &format!("Writing {} bytes to {:?}", export.document.len(), destination),
    );
    destination
        .deliver(&export.document)
        .context("Failed to deliver the document")?;

    Ok(())
}

/// Opens the override database if it is a file, the default one otherwise
fn open_database(output: &Output, path: Option<&std::path::Path>) -> Result<ThingsDatabase> {
    match path {
        Some(path) if path.is_file() => {
            let path = path
                .canonicalize()
                .with_context(|| format!("Failed to resolve {}", path.display()))?;
            output.verbose_ctx("database", &format!("Using {}", path.display()));
            ThingsDatabase::open(&path)
                .with_context(|| format!("Failed to open Things database: {}", path.display()))
        }
        other => {
            if let Some(path) = other {
                output.verbose_ctx(
                    "database",
                    &format!("{} is not a file; using the default database", path.display()),
                );
            }
            ThingsDatabase::open_default().context("Failed to open the Things database")
        }
    }
}
