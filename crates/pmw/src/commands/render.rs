//! `pmw render` command implementation.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::Term;

use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (reads stdin when omitted).
    file: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let document = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        let html = pmw_renderer::render(&document);
        let _ = Term::stdout().write_line(&html);

        Ok(())
    }
}
