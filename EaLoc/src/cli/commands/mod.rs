//! CLI commands

pub mod loc;

use std::path::PathBuf;

use crate::converter::CodecOptions;

/// Mode selected on the command line
#[derive(Debug, Clone)]
pub enum Command {
    /// LOC to text
    Export { loc: PathBuf, text: PathBuf },
    /// Text to LOC, `loc` doubling as the template
    Import {
        text: PathBuf,
        loc: PathBuf,
        output: Option<PathBuf>,
    },
    /// Structure summary of a LOC file
    Info { loc: PathBuf },
}

impl Command {
    /// Run the command
    ///
    /// # Errors
    /// Returns an error if an input file is missing or the operation fails.
    pub fn execute(&self, options: &CodecOptions, quiet: bool) -> anyhow::Result<()> {
        match self {
            Self::Export { loc: source, text } => loc::export(source, text, options, quiet),
            Self::Import {
                text,
                loc: template,
                output,
            } => {
                let dest = output.as_deref().unwrap_or(template);
                loc::import(text, template, dest, options, quiet)
            }
            Self::Info { loc: source } => loc::info(source),
        }
    }
}
