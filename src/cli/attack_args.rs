// MITRE ATT&CK operation arguments

use clap::Args;

/// ATT&CK sync and release listing options
#[derive(Args, Debug, Clone, Default)]
pub struct AttackArgs {
    /// Sync an ATT&CK STIX bundle and dump it to the files directory
    #[arg(id = "attack_sync", long = "attack")]
    pub sync: bool,

    /// ATT&CK domain (enterprise-attack, mobile-attack, ics-attack)
    #[arg(
        long = "attack-domain",
        value_name = "DOMAIN",
        default_value = "enterprise-attack"
    )]
    pub domain: String,

    /// Branch of mitre/cti to fetch from
    #[arg(id = "attack_branch", long = "attack-branch", value_name = "BRANCH", default_value = "master")]
    pub branch: String,

    /// Fetch a published ATT&CK release instead of a branch (e.g. 14.1)
    #[arg(id = "attack_version", long = "attack-version", value_name = "VERSION")]
    pub version: Option<String>,

    /// List published ATT&CK versions and exit
    #[arg(long = "attack-versions")]
    pub list_versions: bool,
}
