// AtlasSyncCommand - fetch MITRE ATLAS data and dump its sections

use super::Command;
use crate::cli::Args;
use crate::config::IntelConfig;
use crate::intel::{AtlasClient, AtlasDocument};
use crate::output::{save_json, save_string};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Fetch ATLAS.yaml, keep the raw document and dump per-matrix JSON files
/// (matrix, tactics, techniques, mitigations, case studies).
pub struct AtlasSyncCommand {
    args: Args,
}

impl AtlasSyncCommand {
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for AtlasSyncCommand {
    async fn execute(&self) -> Result<()> {
        let config = IntelConfig::resolve(&self.args)?;
        let files_dir = &config.output.files_dir;
        let client = AtlasClient::new(&config.cti);

        let yaml = client.fetch_yaml(&self.args.atlas.branch).await?;
        save_string(&yaml, "ATLAS.yaml", files_dir)?;

        let document = AtlasDocument::parse(&yaml)?;
        save_json(document.as_value(), "atlas-to-json", files_dir)?;

        let case_studies = document.case_studies();
        for (i, matrix) in document.matrices().iter().enumerate() {
            save_json(matrix, &format!("matrices_{i}"), files_dir)?;

            for section in ["tactics", "techniques", "mitigations"] {
                if let Some(entries) = matrix.get(section) {
                    save_json(entries, &format!("{section}_{i}"), files_dir)?;
                }
            }

            // Case studies are listed parallel to the matrices
            if let Some(case_study) = case_studies.get(i) {
                save_json::<Value>(case_study, &format!("case_studies_{i}"), files_dir)?;
            }
        }

        println!(
            "✓ ATLAS data saved to {} ({} matrices, {} case studies)",
            files_dir.display(),
            document.matrices().len(),
            case_studies.len()
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "AtlasSyncCommand"
    }
}
