// MITRE ATLAS operation arguments

use clap::Args;

/// ATLAS sync options
#[derive(Args, Debug, Clone, Default)]
pub struct AtlasArgs {
    /// Sync MITRE ATLAS data and dump its matrices to the files directory
    #[arg(id = "atlas_sync", long = "atlas")]
    pub sync: bool,

    /// Branch of mitre-atlas/atlas-data to fetch from
    #[arg(id = "atlas_branch", long = "atlas-branch", value_name = "BRANCH", default_value = "main")]
    pub branch: String,
}
