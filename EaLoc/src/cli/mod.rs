//! `EaLoc` CLI - command-line front end for LOC export and import

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, CommandFactory, Parser};

use crate::converter::CodecOptions;
use crate::formats::{ChunkLayout, ControlCodeTable, TextEncoding};
use commands::Command;

#[derive(Parser)]
#[command(name = "ealoc", version)]
#[command(about = "EaLoc: export and import EA .loc localization files", long_about = None)]
#[command(group(ArgGroup::new("mode").args(["export", "import", "info"])))]
struct Cli {
    /// Export a LOC file to text
    #[arg(short, long, num_args = 2, value_names = ["LOC", "TEXT"])]
    export: Option<Vec<PathBuf>>,

    /// Import a text file, using LOC as the template (overwritten unless --output is given)
    #[arg(short, long, num_args = 2, value_names = ["TEXT", "LOC"])]
    import: Option<Vec<PathBuf>>,

    /// Print the structure of a LOC file
    #[arg(long, value_name = "LOC")]
    info: Option<PathBuf>,

    /// Encoding of the LOC strings: utf8, utf16 or latin-1
    #[arg(long, default_value_t = TextEncoding::Utf8)]
    encoding: TextEncoding,

    /// JSON control-code table replacing the built-in one
    #[arg(long, value_name = "JSON")]
    control_codes: Option<PathBuf>,

    /// Write true chunk sizes, language IDs and offsets on import
    #[arg(long, requires = "import")]
    recompute_sizes: bool,

    /// Import: write the rebuilt LOC here instead of over the template
    #[arg(short, long, value_name = "LOC", requires = "import")]
    output: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn mode(&self) -> Option<Command> {
        if let Some([loc, text]) = self.export.as_deref() {
            return Some(Command::Export {
                loc: loc.clone(),
                text: text.clone(),
            });
        }
        if let Some([text, loc]) = self.import.as_deref() {
            return Some(Command::Import {
                text: text.clone(),
                loc: loc.clone(),
                output: self.output.clone(),
            });
        }
        self.info.clone().map(|loc| Command::Info { loc })
    }

    fn codec_options(&self) -> anyhow::Result<CodecOptions> {
        let table = match &self.control_codes {
            Some(path) => ControlCodeTable::load(path)
                .with_context(|| format!("Failed to load control codes from {}", path.display()))?,
            None => ControlCodeTable::builtin(),
        };
        let layout = if self.recompute_sizes {
            ChunkLayout::Recompute
        } else {
            ChunkLayout::Placeholder
        };

        Ok(CodecOptions::new()
            .with_encoding(self.encoding)
            .with_control_codes(table)
            .with_layout(layout))
    }
}

/// Run the `EaLoc` CLI
///
/// # Errors
/// Returns an error if no mode is given, an input file is missing, or the
/// conversion fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let Some(command) = cli.mode() else {
        Cli::command().print_help()?;
        anyhow::bail!("one of --export, --import or --info is required");
    };

    let options = cli.codec_options()?;
    command.execute(&options, cli.quiet)
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
