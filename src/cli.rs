use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory where video files or folders are located
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Desired subtitle language, as a 3-letter ISO-639-3 code
    #[arg(short, long, default_value = "eng")]
    pub language: String,

    /// Minimum size (in MB) that video files must be for subtitles
    /// to be downloaded
    #[arg(short = 's', long)]
    pub min_size_mb: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
