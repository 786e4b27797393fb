//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "asar-pack",
    version,
    about = "Pack files into an ASAR archive"
)]
pub struct Cli {
    /// Files to pack, relative to --base. Each is stored under the name given here.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Directory the file names are resolved against
    #[arg(long, default_value = ".")]
    pub base: PathBuf,

    /// Output archive path
    #[arg(long, short)]
    pub output: PathBuf,

    /// Skip integrity records
    #[arg(long, env = "ASAR_PACK_NO_INTEGRITY")]
    pub no_integrity: bool,

    /// JSON file with pack options (`integrity`, `max_archive_bytes`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ceiling on the cumulative payload size in bytes
    #[arg(long)]
    pub max_archive_bytes: Option<u64>,

    /// Print a summary of the written archive
    #[arg(long, short)]
    pub verbose: bool,
}
