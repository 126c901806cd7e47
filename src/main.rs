//! Hexheat binary: CLI parsing and session startup.

use clap::{Parser, ValueEnum};
use hexheat::{DisplayBase, FileSet, Viewer, ViewerConfig, WordSize};
use std::path::PathBuf;
use std::process::ExitCode;

/// Compare binary files byte-by-byte in the terminal.
#[derive(Parser)]
#[command(author, version, about = "Compare binary files byte-by-byte in the terminal", long_about = None)]
struct Cli {
    /// Files to compare; the first file defines the scrollable extent
    #[arg(required = true, num_args = 1..)]
    files: Vec<PathBuf>,

    /// Numeric base for byte values
    #[arg(long, value_enum, default_value_t = BaseArg::Hex)]
    base: BaseArg,

    /// Bits per display group
    #[arg(long, value_enum, default_value_t = WordArg::W8)]
    word: WordArg,

    /// Start with the settings panel expanded
    #[arg(long)]
    panel: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BaseArg {
    Hex,
    Bin,
}

impl From<BaseArg> for DisplayBase {
    fn from(arg: BaseArg) -> Self {
        match arg {
            BaseArg::Hex => Self::Hex,
            BaseArg::Bin => Self::Binary,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WordArg {
    #[value(name = "4")]
    W4,
    #[value(name = "8")]
    W8,
    #[value(name = "16")]
    W16,
    #[value(name = "32")]
    W32,
}

impl From<WordArg> for WordSize {
    fn from(arg: WordArg) -> Self {
        match arg {
            WordArg::W4 => Self::Nibble,
            WordArg::W8 => Self::Byte,
            WordArg::W16 => Self::Word,
            WordArg::W32 => Self::DWord,
        }
    }
}

fn run(cli: &Cli) -> hexheat::Result<()> {
    // Startup errors surface here, before any terminal takeover.
    let files = FileSet::open(&cli.files)?;

    let config = ViewerConfig {
        base: cli.base.into(),
        word: cli.word.into(),
        panel_open: cli.panel,
    };
    Viewer::new(files, config).run()
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hexheat: {err}");
            ExitCode::FAILURE
        }
    }
}
