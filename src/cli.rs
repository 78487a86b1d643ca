use std::path::PathBuf;

/// Slide document inspector
#[derive(clap::Parser, Debug)]
#[command(version = "0.1", about = "Prints the outline of slide documents", long_about = None)]
pub(super) struct Args {
    /// Documents to parse
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Parse only the title block of each document
    #[arg(long)]
    pub titles_only: bool,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
