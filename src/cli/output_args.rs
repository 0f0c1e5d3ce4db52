// Output configuration arguments

use clap::Args;
use std::path::PathBuf;

/// Output and display options
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Directory for JSON dumps (default ./files)
    #[arg(long = "files-dir", value_name = "DIR")]
    pub files_dir: Option<PathBuf>,

    /// Quiet mode (no banner)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}
