// AttackVersionsCommand - list published ATT&CK releases

use super::Command;
use crate::cli::Args;
use crate::config::IntelConfig;
use crate::intel::AttackClient;
use crate::Result;
use async_trait::async_trait;

/// List the ATT&CK versions published as mitre/cti release tags.
pub struct AttackVersionsCommand {
    args: Args,
}

impl AttackVersionsCommand {
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for AttackVersionsCommand {
    async fn execute(&self) -> Result<()> {
        let config = IntelConfig::resolve(&self.args)?;
        let client = AttackClient::new(&config.cti);

        let versions = client.attack_versions().await?;
        println!("Published ATT&CK versions ({}):", versions.len());
        for version in versions {
            println!("  v{}", version);
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "AttackVersionsCommand"
    }
}
