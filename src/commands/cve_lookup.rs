// CveLookupCommand - fetch a CVE, report on it, estimate CVSS v4.0

use super::Command;
use crate::cli::Args;
use crate::config::IntelConfig;
use crate::cve::{CveRecord, CvssVersion, NvdClient};
use crate::cvss::CvssV4Estimate;
use crate::error::IntelError;
use crate::output::save_json;
use crate::Result;
use async_trait::async_trait;
use colored::Colorize;
use std::fs;
use tracing::warn;

/// Look up a single CVE (from the NVD API or a local payload), print its
/// CVSS v3.1 data, estimate a v4.0 score and dump the JSON reports.
pub struct CveLookupCommand {
    args: Args,
}

impl CveLookupCommand {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    async fn load_record(&self, config: &IntelConfig) -> Result<CveRecord> {
        if let Some(path) = &self.args.input {
            let payload = fs::read_to_string(path).map_err(|source| {
                IntelError::FileSystemError {
                    path: path.clone(),
                    source,
                }
            })?;
            return Ok(CveRecord::parse_str(&payload)?);
        }

        let cve_id = self.args.cve_id.as_deref().ok_or_else(|| {
            IntelError::InvalidInput {
                message: "a CVE id or --input file is required".to_string(),
            }
        })?;

        let mut client = NvdClient::new(&config.nvd);
        Ok(client.fetch_cve(cve_id).await?)
    }

    fn print_summary(&self, record: &CveRecord) {
        println!("\n{}", record.id().bold());
        if let Some(description) = record.description("en") {
            println!("  {}", description);
        }
        println!();

        match record.cvss_vector() {
            Ok(vector) => {
                println!("  CVSS v3.1 vector:   {}", vector);
                if let Ok(score) = record.cvss_base_score() {
                    println!("  CVSS v3.1 score:    {}", score);
                }
                if let Ok(severity) = record.cvss_severity() {
                    println!("  CVSS v3.1 severity: {}", severity.yellow());
                }
            }
            Err(err) => warn!("No CVSS v3.1 data for {}: {}", record.id(), err),
        }
    }

    fn print_estimate(&self, estimate: &CvssV4Estimate) {
        println!();
        println!(
            "  CVSS v4.0 low estimate:  {} ({})",
            estimate.low_estimate().vector_string(),
            estimate.low_estimate().base_score()
        );
        println!(
            "  CVSS v4.0 high estimate: {} ({})",
            estimate.high_estimate().vector_string(),
            estimate.high_estimate().base_score()
        );
        println!(
            "  Estimated v4.0 score:    {} ({})",
            estimate.estimated_base_score(),
            estimate.estimated_severity().as_str().yellow()
        );
    }
}

#[async_trait]
impl Command for CveLookupCommand {
    async fn execute(&self) -> Result<()> {
        let config = IntelConfig::resolve(&self.args)?;
        let record = self.load_record(&config).await?;

        self.print_summary(&record);

        // Estimation needs a v3.1 vector; records without one still get the
        // full-report dump below.
        let estimate = if self.args.cve.no_estimate {
            None
        } else {
            match record.cvss_vector() {
                Ok(vector) => Some(CvssV4Estimate::from_vector_string(vector)?),
                Err(_) => None,
            }
        };

        if let Some(estimate) = &estimate {
            self.print_estimate(estimate);
        }

        if let Some(version) = &self.args.cve.exploitability {
            let version: CvssVersion = version.parse()?;
            let score = record.exploitability_score(version)?;
            println!("\n  Exploitability score (v{}): {}", version, score);
        }

        if !self.args.cve.no_report {
            let files_dir = &config.output.files_dir;

            let report_name = format!("full_{}_report", record.id());
            let path = save_json(record.raw(), &report_name, files_dir)?;
            println!("\n✓ Full report saved to: {}", path.display());

            if let Some(estimate) = &estimate {
                let estimate_name = format!("estimate_{}_cvss4", record.id());
                let report = estimate.to_report(Some(record.id()));
                let path = save_json(&report, &estimate_name, files_dir)?;
                println!("✓ Estimate saved to:    {}", path.display());
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "CveLookupCommand"
    }
}
