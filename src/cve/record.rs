// CVE record model
//
// Validates and indexes a single NVD API v2.0 `cves` response. Mandatory
// fields (`format`, `vulnerabilities[0].cve.id`, `.descriptions`) fail the
// parse when absent; `metrics` and `weaknesses` are optional and default to
// empty. The record is read-only once constructed.

use crate::error::IntelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// One entry of the `descriptions` list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Description {
    pub lang: String,
    pub value: String,
}

/// CVSS versions the exploitability-score accessor supports.
///
/// Only the two versions the NVD payload carries are representable; arbitrary
/// version strings are rejected at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvssVersion {
    V31,
    V2,
}

impl CvssVersion {
    fn metric_family(&self) -> &'static str {
        match self {
            CvssVersion::V31 => "cvssMetricV31",
            CvssVersion::V2 => "cvssMetricV2",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CvssVersion::V31 => "3.1",
            CvssVersion::V2 => "2.0",
        }
    }
}

impl fmt::Display for CvssVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CvssVersion {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3.1" => Ok(CvssVersion::V31),
            "2.0" | "2" => Ok(CvssVersion::V2),
            other => Err(IntelError::UnsupportedVersion {
                version: other.to_string(),
            }),
        }
    }
}

/// A validated CVE record from an NVD cveId lookup
#[derive(Debug, Clone)]
pub struct CveRecord {
    format: String,
    id: String,
    descriptions: Vec<Description>,
    metrics: Map<String, Value>,
    weaknesses: Vec<Value>,
    raw: Value,
}

impl CveRecord {
    /// Validate and index an NVD API payload.
    pub fn parse(payload: Value) -> Result<Self, IntelError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| IntelError::malformed("CVE payload is not a JSON object"))?;
        if obj.is_empty() {
            return Err(IntelError::malformed("CVE payload is empty"));
        }

        let format = obj
            .get("format")
            .ok_or_else(|| IntelError::mandatory("format"))?
            .as_str()
            .ok_or_else(|| IntelError::malformed("`format` is not a string"))?
            .to_owned();

        let cve = obj
            .get("vulnerabilities")
            .ok_or_else(|| IntelError::mandatory("vulnerabilities"))?
            .as_array()
            .ok_or_else(|| IntelError::malformed("`vulnerabilities` is not an array"))?
            .first()
            .and_then(|entry| entry.get("cve"))
            .ok_or_else(|| IntelError::mandatory("vulnerabilities[0].cve"))?;

        let id = cve
            .get("id")
            .ok_or_else(|| IntelError::mandatory("cve.id"))?
            .as_str()
            .ok_or_else(|| IntelError::malformed("`cve.id` is not a string"))?
            .to_owned();

        let descriptions = cve
            .get("descriptions")
            .ok_or_else(|| IntelError::mandatory("cve.descriptions"))?;
        let descriptions: Vec<Description> = serde_json::from_value(descriptions.clone())
            .map_err(|e| IntelError::malformed(format!("`descriptions` entries are invalid: {e}")))?;

        let metrics = match cve.get("metrics") {
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err(IntelError::malformed("`metrics` is not an object")),
            None => Map::new(),
        };

        let weaknesses = match cve.get("weaknesses") {
            Some(Value::Array(list)) => list.clone(),
            Some(_) => return Err(IntelError::malformed("`weaknesses` is not an array")),
            None => Vec::new(),
        };

        Ok(CveRecord {
            format,
            id,
            descriptions,
            metrics,
            weaknesses,
            raw: payload,
        })
    }

    /// Parse from JSON text (e.g. a payload stored on disk).
    pub fn parse_str(payload: &str) -> Result<Self, IntelError> {
        if payload.trim().is_empty() {
            return Err(IntelError::malformed("CVE payload is empty"));
        }
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| IntelError::malformed(format!("CVE payload is not valid JSON: {e}")))?;
        Self::parse(value)
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn descriptions(&self) -> &[Description] {
        &self.descriptions
    }

    /// First description for the given language tag, if any.
    pub fn description(&self, lang: &str) -> Option<&str> {
        self.descriptions
            .iter()
            .find(|d| d.lang == lang)
            .map(|d| d.value.as_str())
    }

    /// Metric families as they appear in the payload.
    pub fn metrics(&self) -> &Map<String, Value> {
        &self.metrics
    }

    pub fn weaknesses(&self) -> &[Value] {
        &self.weaknesses
    }

    /// The full payload, for report dumps.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    fn v31_cvss_data(&self) -> Option<&Value> {
        self.metrics.get("cvssMetricV31")?.get(0)?.get("cvssData")
    }

    /// The CVSS v3.1 vector string.
    pub fn cvss_vector(&self) -> Result<&str, IntelError> {
        self.v31_cvss_data()
            .and_then(|data| data.get("vectorString"))
            .and_then(Value::as_str)
            .ok_or_else(|| IntelError::missing("metrics contain no CVSS v3.1 vector string"))
    }

    /// The CVSS v3.1 base score.
    pub fn cvss_base_score(&self) -> Result<f64, IntelError> {
        self.v31_cvss_data()
            .and_then(|data| data.get("baseScore"))
            .and_then(Value::as_f64)
            .ok_or_else(|| IntelError::missing("metrics contain no CVSS v3.1 base score"))
    }

    /// The CVSS v3.1 base severity label.
    pub fn cvss_severity(&self) -> Result<&str, IntelError> {
        self.v31_cvss_data()
            .and_then(|data| data.get("baseSeverity"))
            .and_then(Value::as_str)
            .ok_or_else(|| IntelError::missing("metrics contain no CVSS v3.1 base severity"))
    }

    /// The exploitability score for the requested CVSS version.
    pub fn exploitability_score(&self, version: CvssVersion) -> Result<f64, IntelError> {
        let entry = self
            .metrics
            .get(version.metric_family())
            .and_then(|family| family.get(0))
            .ok_or_else(|| {
                IntelError::missing(format!("metrics contain no CVSS v{version} data"))
            })?;

        entry
            .get("exploitabilityScore")
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                IntelError::missing(format!(
                    "CVSS v{version} metrics carry no exploitability score"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Value {
        json!({
            "format": "NVD_CVE",
            "version": "2.0",
            "vulnerabilities": [{
                "cve": {
                    "id": "CVE-2021-30737",
                    "descriptions": [
                        {"lang": "en", "value": "A memory corruption issue."},
                        {"lang": "es", "value": "Un problema de corrupción de memoria."}
                    ],
                    "metrics": {
                        "cvssMetricV31": [{
                            "cvssData": {
                                "vectorString": "CVSS:3.1/AV:N/AC:L/PR:N/UI:R/S:U/C:H/I:H/A:H",
                                "baseScore": 8.8,
                                "baseSeverity": "HIGH"
                            },
                            "exploitabilityScore": 2.8
                        }],
                        "cvssMetricV2": [{
                            "cvssData": {"vectorString": "AV:N/AC:M/Au:N/C:P/I:P/A:P"},
                            "exploitabilityScore": 8.6
                        }]
                    },
                    "weaknesses": [{"source": "nvd@nist.gov", "type": "Primary"}]
                }
            }]
        })
    }

    #[test]
    fn test_parse_empty_payload_is_malformed() {
        let err = CveRecord::parse(json!({})).unwrap_err();
        assert!(matches!(err, IntelError::Malformed { .. }));
    }

    #[test]
    fn test_parse_missing_vulnerabilities_is_mandatory() {
        let err = CveRecord::parse(json!({"format": "x"})).unwrap_err();
        assert!(matches!(err, IntelError::MandatoryField { .. }));
    }

    #[test]
    fn test_parse_missing_descriptions_is_mandatory() {
        let err = CveRecord::parse(json!({
            "format": "NVD_CVE",
            "vulnerabilities": [{"cve": {"id": "CVE-2024-0001"}}]
        }))
        .unwrap_err();
        assert!(matches!(err, IntelError::MandatoryField { .. }));
    }

    #[test]
    fn test_parse_without_optional_fields() {
        let record = CveRecord::parse(json!({
            "format": "NVD_CVE",
            "vulnerabilities": [{"cve": {
                "id": "CVE-2024-0001",
                "descriptions": [{"lang": "en", "value": "text"}]
            }}]
        }))
        .unwrap();
        assert!(record.metrics().is_empty());
        assert!(record.weaknesses().is_empty());
    }

    #[test]
    fn test_accessors_on_full_record() {
        let record = CveRecord::parse(sample_payload()).unwrap();
        assert_eq!(record.id(), "CVE-2021-30737");
        assert_eq!(record.format(), "NVD_CVE");
        assert_eq!(record.description("en"), Some("A memory corruption issue."));
        assert_eq!(
            record.cvss_vector().unwrap(),
            "CVSS:3.1/AV:N/AC:L/PR:N/UI:R/S:U/C:H/I:H/A:H"
        );
        assert_eq!(record.cvss_base_score().unwrap(), 8.8);
        assert_eq!(record.cvss_severity().unwrap(), "HIGH");
        assert_eq!(record.weaknesses().len(), 1);
    }

    #[test]
    fn test_missing_v31_metrics() {
        let record = CveRecord::parse(json!({
            "format": "NVD_CVE",
            "vulnerabilities": [{"cve": {
                "id": "CVE-2024-0001",
                "descriptions": [{"lang": "en", "value": "text"}],
                "metrics": {}
            }}]
        }))
        .unwrap();

        assert!(matches!(
            record.cvss_vector().unwrap_err(),
            IntelError::MissingData { .. }
        ));
        assert!(matches!(
            record.cvss_base_score().unwrap_err(),
            IntelError::MissingData { .. }
        ));
    }

    #[test]
    fn test_exploitability_score_versions() {
        let record = CveRecord::parse(sample_payload()).unwrap();
        assert_eq!(record.exploitability_score(CvssVersion::V31).unwrap(), 2.8);
        assert_eq!(record.exploitability_score(CvssVersion::V2).unwrap(), 8.6);
    }

    #[test]
    fn test_exploitability_score_missing_field() {
        let record = CveRecord::parse(json!({
            "format": "NVD_CVE",
            "vulnerabilities": [{"cve": {
                "id": "CVE-2024-0001",
                "descriptions": [{"lang": "en", "value": "text"}],
                "metrics": {"cvssMetricV31": [{"cvssData": {}}]}
            }}]
        }))
        .unwrap();

        assert!(matches!(
            record.exploitability_score(CvssVersion::V31).unwrap_err(),
            IntelError::MissingData { .. }
        ));
    }

    #[test]
    fn test_unsupported_version_is_rejected_at_parse() {
        let err = "1.0".parse::<CvssVersion>().unwrap_err();
        assert!(matches!(err, IntelError::UnsupportedVersion { .. }));
        assert!("3.1".parse::<CvssVersion>().is_ok());
        assert!("2.0".parse::<CvssVersion>().is_ok());
    }

    #[test]
    fn test_parse_str_rejects_empty_and_invalid() {
        assert!(matches!(
            CveRecord::parse_str("").unwrap_err(),
            IntelError::Malformed { .. }
        ));
        assert!(matches!(
            CveRecord::parse_str("{not json").unwrap_err(),
            IntelError::Malformed { .. }
        ));
    }
}
