// CVE lookup arguments

use clap::Args;

/// Options for the CVE lookup mode
#[derive(Args, Debug, Clone, Default)]
pub struct CveArgs {
    /// Also print the exploitability score for a CVSS version (3.1 or 2.0)
    #[arg(long = "exploitability", value_name = "VERSION")]
    pub exploitability: Option<String>,

    /// Skip the CVSS v4.0 estimation
    #[arg(long = "no-estimate")]
    pub no_estimate: bool,

    /// Skip the JSON report dumps
    #[arg(long = "no-report")]
    pub no_report: bool,
}
