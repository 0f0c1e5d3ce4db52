// MITRE ATLAS data access
//
// ATLAS ships as one YAML document (dist/ATLAS.yaml) holding matrices and
// case studies. The document is converted to JSON once so the dump helpers
// and downstream consumers only deal with one representation.

use crate::config::CtiSettings;
use crate::error::IntelError;
use crate::utils::retry::{retry_request, RetryConfig};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Client for the mitre-atlas/atlas-data distribution
pub struct AtlasClient {
    client: reqwest::Client,
    atlas_base: String,
    retry: RetryConfig,
}

impl AtlasClient {
    pub fn new(settings: &CtiSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("intelrun/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            atlas_base: settings.atlas_base.clone(),
            retry: RetryConfig::default(),
        }
    }

    /// Fetch the raw ATLAS.yaml text from a branch (default main).
    pub async fn fetch_yaml(&self, branch: &str) -> Result<String, IntelError> {
        let url = format!("{}/{branch}/dist/ATLAS.yaml", self.atlas_base);
        info!("Fetching ATLAS data from branch {}", branch);

        let response = retry_request(&self.retry, || self.client.get(&url).send()).await?;
        Ok(response.text().await?)
    }
}

/// The parsed ATLAS document, held as JSON
#[derive(Debug, Clone)]
pub struct AtlasDocument {
    document: Value,
}

impl AtlasDocument {
    /// Parse the YAML text and convert it to JSON.
    pub fn parse(yaml: &str) -> Result<Self, IntelError> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let document = serde_json::to_value(&value)?;
        Ok(Self { document })
    }

    pub fn as_value(&self) -> &Value {
        &self.document
    }

    pub fn matrices(&self) -> &[Value] {
        self.section("matrices")
    }

    /// Case studies are listed parallel to the matrices.
    pub fn case_studies(&self) -> &[Value] {
        self.section("case-studies")
    }

    fn section(&self, key: &str) -> &[Value] {
        self.document
            .get(key)
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"
id: ATLAS
name: Adversarial Threat Landscape for AI Systems
matrices:
  - id: ATLAS
    name: ATLAS Machine Learning Threat Matrix
    tactics:
      - id: AML.TA0002
        name: Reconnaissance
    techniques:
      - id: AML.T0000
        name: Search for Victim's Publicly Available Research Materials
    mitigations:
      - id: AML.M0000
        name: Limit Release of Public Information
case-studies:
  - id: AML.CS0000
    name: Evasion of Deep Learning Detector for Malware C&C Traffic
"#;

    #[test]
    fn test_parse_sections() {
        let doc = AtlasDocument::parse(SAMPLE_YAML).unwrap();
        assert_eq!(doc.matrices().len(), 1);
        assert_eq!(doc.case_studies().len(), 1);
        assert_eq!(doc.as_value()["id"], "ATLAS");
    }

    #[test]
    fn test_matrix_carries_its_sections() {
        let doc = AtlasDocument::parse(SAMPLE_YAML).unwrap();
        let matrix = &doc.matrices()[0];
        assert_eq!(matrix["tactics"][0]["id"], "AML.TA0002");
        assert_eq!(matrix["techniques"][0]["id"], "AML.T0000");
        assert_eq!(matrix["mitigations"][0]["id"], "AML.M0000");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(AtlasDocument::parse("matrices: [unclosed").is_err());
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let doc = AtlasDocument::parse("id: ATLAS").unwrap();
        assert!(doc.matrices().is_empty());
        assert!(doc.case_studies().is_empty());
    }
}
