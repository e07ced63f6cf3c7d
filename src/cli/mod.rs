//! # Command-Line Interface
//!
//! A single command: `things2taskpaper [OPTIONS] [UUIDS]...`
//!
//! | Flag | Purpose |
//! |------|---------|
//! | `--write-to-clipboard` | Copy the document instead of printing it |
//! | `--database <PATH>` | Read another Things database (`$THINGS_DATABASE`) |
//! | `--sort-direct-todos` | Sort a project's direct to-dos by index |
//! | `--no-write-to-clipboard`, `--no-sort-direct-todos` | Turn a config `true` off |
//! | `--config <PATH>` | Use another config file (`$THINGS_TASKPAPER_CONFIG`) |
//! | `--verbose` | Debug output on stderr |
//!
//! With no uuids the whole database is exported. With uuids, exactly those
//! items are exported in the order given; bad uuids are reported on stderr
//! and skipped.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the export.

mod app;
mod destination;
mod output;

pub use app::{run, Cli};
pub use destination::{Destination, DestinationError};
pub use output::Output;
