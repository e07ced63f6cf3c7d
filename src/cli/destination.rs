//! Document delivery
//!
//! The finished document goes to exactly one place per run, in one write.

use std::io::{self, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DestinationError {
    #[error("Clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Where the document is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    #[default]
    Stdout,
    /// The system clipboard, for OmniFocus' "Import TaskPaper from Clipboard"
    Clipboard,
}

impl Destination {
    pub fn from_flag(write_to_clipboard: bool) -> Self {
        if write_to_clipboard {
            Destination::Clipboard
        } else {
            Destination::Stdout
        }
    }

    /// Writes the whole document
    pub fn deliver(&self, document: &str) -> Result<(), DestinationError> {
        match self {
            Destination::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(document.as_bytes())?;
                stdout.flush()?;
                Ok(())
            }
            Destination::Clipboard => copy_to_clipboard(document),
        }
    }
}

fn copy_to_clipboard(document: &str) -> Result<(), DestinationError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(document)?;
    Ok(())
}
