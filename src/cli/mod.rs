// CLI module - Command line interface and argument parsing

use clap::Parser;
use std::path::PathBuf;

mod attack_args;
mod atlas_args;
mod cve_args;
mod output_args;

pub use attack_args::AttackArgs;
pub use atlas_args::AtlasArgs;
pub use cve_args::CveArgs;
pub use output_args::OutputArgs;

/// IntelRun - Vulnerability intelligence collector
///
/// The Args struct composes the domain-specific sub-structs with clap's
/// #[command(flatten)] attribute:
/// - CVE lookup options (CveArgs)
/// - ATT&CK sync operations (AttackArgs)
/// - ATLAS sync operations (AtlasArgs)
/// - Output and display (OutputArgs)
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, long_about = None)]
#[command(name = "intelrun")]
#[command(about = "Vulnerability intelligence collector (NVD CVE, MITRE ATT&CK/ATLAS)")]
pub struct Args {
    /// CVE id to look up (e.g. CVE-2021-30737)
    #[arg(value_name = "CVE-ID")]
    pub cve_id: Option<String>,

    /// Read the CVE payload from a local JSON file instead of the NVD API
    #[arg(long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write an example configuration file and exit
    #[arg(long = "config-example", value_name = "FILE")]
    pub config_example: Option<PathBuf>,

    // ============ CVE Lookup Options ============
    #[command(flatten)]
    pub cve: CveArgs,

    // ============ MITRE ATT&CK Operations ============
    #[command(flatten)]
    pub attack: AttackArgs,

    // ============ MITRE ATLAS Operations ============
    #[command(flatten)]
    pub atlas: AtlasArgs,

    // ============ Output and Display ============
    #[command(flatten)]
    pub output: OutputArgs,
}
