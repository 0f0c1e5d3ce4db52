// MITRE ATT&CK data access
//
// Bundles are fetched from the mitre/cti GitHub mirror, either from a branch
// (default master) or from a published release tag. The TAXII collection ids
// are kept as domain metadata; the TAXII wire protocol itself is not spoken.

use crate::config::CtiSettings;
use crate::error::IntelError;
use crate::intel::stix::StixBundle;
use crate::utils::retry::{retry_request, RetryConfig};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// The three ATT&CK technology domains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackDomain {
    Enterprise,
    Mobile,
    Ics,
}

impl AttackDomain {
    pub const ALL: [AttackDomain; 3] = [
        AttackDomain::Enterprise,
        AttackDomain::Mobile,
        AttackDomain::Ics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackDomain::Enterprise => "enterprise-attack",
            AttackDomain::Mobile => "mobile-attack",
            AttackDomain::Ics => "ics-attack",
        }
    }

    /// TAXII collection id of the domain on cti-taxii.mitre.org
    pub fn collection_id(&self) -> &'static str {
        match self {
            AttackDomain::Enterprise => "95ecc380-afe9-11e4-9b6c-751b66dd541e",
            AttackDomain::Mobile => "2f669986-b40b-4423-b720-4396ca6a462b",
            AttackDomain::Ics => "02c3ef24-9cd4-48f3-a99f-b74ce24f1d34",
        }
    }
}

impl fmt::Display for AttackDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttackDomain {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enterprise-attack" | "enterprise" => Ok(AttackDomain::Enterprise),
            "mobile-attack" | "mobile" => Ok(AttackDomain::Mobile),
            "ics-attack" | "ics" => Ok(AttackDomain::Ics),
            other => Err(IntelError::InvalidInput {
                message: format!(
                    "unknown ATT&CK domain `{other}` (expected enterprise-attack, mobile-attack or ics-attack)"
                ),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TagRef {
    #[serde(rename = "ref")]
    ref_name: String,
}

/// Client for ATT&CK STIX bundles and release metadata
pub struct AttackClient {
    client: reqwest::Client,
    attack_base: String,
    tags_url: String,
    retry: RetryConfig,
}

impl AttackClient {
    pub fn new(settings: &CtiSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("intelrun/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            attack_base: settings.attack_base.clone(),
            tags_url: settings.tags_url.clone(),
            retry: RetryConfig::default(),
        }
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, IntelError> {
        let response = retry_request(&self.retry, || self.client.get(url).send()).await?;
        Ok(response.json().await?)
    }

    /// Fetch the raw STIX bundle of a domain from a branch.
    pub async fn fetch_bundle_raw(
        &self,
        domain: AttackDomain,
        branch: &str,
    ) -> Result<Value, IntelError> {
        let url = format!("{}/{branch}/{domain}/{domain}.json", self.attack_base);
        info!("Fetching ATT&CK {} bundle from branch {}", domain, branch);
        self.fetch_json(&url).await
    }

    /// Fetch the raw STIX bundle of a domain at a published release.
    pub async fn fetch_bundle_version_raw(
        &self,
        domain: AttackDomain,
        version: &str,
    ) -> Result<Value, IntelError> {
        // Release tags are named ATT&CK-v<version>; the ampersand must stay
        // percent-encoded in the raw URL.
        let url = format!(
            "{}/ATT%26CK-v{version}/{domain}/{domain}.json",
            self.attack_base
        );
        info!("Fetching ATT&CK {} bundle at release v{}", domain, version);
        self.fetch_json(&url).await
    }

    /// Fetch and parse a bundle from a branch.
    pub async fn fetch_bundle(
        &self,
        domain: AttackDomain,
        branch: &str,
    ) -> Result<StixBundle, IntelError> {
        let raw = self.fetch_bundle_raw(domain, branch).await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// List published ATT&CK versions from the mitre/cti release tags.
    pub async fn attack_versions(&self) -> Result<Vec<String>, IntelError> {
        let response =
            retry_request(&self.retry, || self.client.get(&self.tags_url).send()).await?;
        let tags: Vec<TagRef> = response.json().await?;

        let tag_pattern = Regex::new(r"ATT&CK-v(.*)").expect("valid regex literal");
        Ok(tags
            .iter()
            .filter_map(|tag| tag_pattern.captures(&tag.ref_name))
            .map(|captures| captures[1].to_string())
            .collect())
    }
}
