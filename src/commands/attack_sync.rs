// AttackSyncCommand - fetch an ATT&CK STIX bundle and dump it

use super::Command;
use crate::cli::Args;
use crate::config::IntelConfig;
use crate::intel::{AttackClient, AttackDomain, StixStore};
use crate::output::save_json;
use crate::Result;
use async_trait::async_trait;

/// Fetch the STIX bundle of one ATT&CK domain (from a branch or a published
/// release), dump it to the files directory and print an object summary.
pub struct AttackSyncCommand {
    args: Args,
}

impl AttackSyncCommand {
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for AttackSyncCommand {
    async fn execute(&self) -> Result<()> {
        let config = IntelConfig::resolve(&self.args)?;
        let domain: AttackDomain = self.args.attack.domain.parse()?;
        let client = AttackClient::new(&config.cti);

        let (raw, dump_name) = match &self.args.attack.version {
            Some(version) => (
                client.fetch_bundle_version_raw(domain, version).await?,
                format!("{domain}-v{version}"),
            ),
            None => (
                client
                    .fetch_bundle_raw(domain, &self.args.attack.branch)
                    .await?,
                domain.to_string(),
            ),
        };

        let path = save_json(&raw, &dump_name, &config.output.files_dir)?;
        println!("✓ {} bundle saved to: {}", domain, path.display());

        let store = StixStore::from_value(&raw)?;
        println!(
            "  {} objects | {} groups | {} mitigations | {} software | {} campaigns",
            store.len(),
            store.groups(false).len(),
            store.mitigations(false).len(),
            store.software(false).len(),
            store.campaigns(false).len()
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "AttackSyncCommand"
    }
}
