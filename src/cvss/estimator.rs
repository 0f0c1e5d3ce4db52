// CVSS v3.1 -> v4.0 estimation
//
// Most v4.0 base metrics have a direct v3.1 counterpart. The two that do not
// are handled as follows:
//
// - Attack Requirements (AT) has no v3.1 analogue, so the estimator derives
//   two vectors that differ only in AT (N and P) and averages their scores.
// - Subsequent-system impact (SC/SI/SA) is derived from Scope: an unchanged
//   scope assumes no subsequent impact, a changed scope assumes the vulnerable
//   system's impact repeats on subsequent systems.

use crate::cvss::v31::{self, CvssV31Vector, Impact, Scope};
use crate::cvss::v4::{AttackRequirements, CvssV4Vector, UserInteraction};
use crate::cvss::Severity;
use crate::error::IntelError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A CVSS v4.0 estimate bracketed from a real v3.1 vector.
///
/// Holds the two derived vectors (low estimate AT:N, high estimate AT:P),
/// the averaged base score and the severity of that average. Immutable once
/// constructed.
#[derive(Debug, Clone)]
pub struct CvssV4Estimate {
    original: CvssV31Vector,
    low_estimate: CvssV4Vector,
    high_estimate: CvssV4Vector,
    estimated_base_score: f64,
    estimated_severity: Severity,
}

impl CvssV4Estimate {
    /// Estimate from a v3.1 vector string.
    pub fn from_vector_string(vector: &str) -> Result<Self, IntelError> {
        Ok(Self::from_v31(CvssV31Vector::parse(vector)?))
    }

    /// Estimate from already-parsed v3.1 base metrics.
    pub fn from_v31(original: CvssV31Vector) -> Self {
        let low_estimate = derive_v4(&original, AttackRequirements::None);
        let high_estimate = derive_v4(&original, AttackRequirements::Present);

        // The mean of two one-decimal scores is a two-decimal number; snap
        // the float there so displays and dumps stay clean.
        let mean = (low_estimate.base_score() + high_estimate.base_score()) / 2.0;
        let estimated_base_score = (mean * 100.0).round() / 100.0;
        let estimated_severity = Severity::from_score(estimated_base_score);

        CvssV4Estimate {
            original,
            low_estimate,
            high_estimate,
            estimated_base_score,
            estimated_severity,
        }
    }

    /// The v3.1 vector the estimate was derived from.
    pub fn original(&self) -> &CvssV31Vector {
        &self.original
    }

    /// The derived vector assuming no attack requirements (AT:N).
    pub fn low_estimate(&self) -> &CvssV4Vector {
        &self.low_estimate
    }

    /// The derived vector assuming attack requirements are present (AT:P).
    pub fn high_estimate(&self) -> &CvssV4Vector {
        &self.high_estimate
    }

    /// Arithmetic mean of the two estimates' base scores.
    pub fn estimated_base_score(&self) -> f64 {
        self.estimated_base_score
    }

    pub fn estimated_severity(&self) -> Severity {
        self.estimated_severity
    }

    /// Serializable report for the JSON dump.
    pub fn to_report(&self, cve_id: Option<&str>) -> EstimateReport {
        EstimateReport {
            cve_id: cve_id.map(str::to_owned),
            original_vector: self.original.vector_string(),
            original_base_score: self.original.base_score(),
            low_estimate_vector: self.low_estimate.vector_string(),
            low_estimate_score: self.low_estimate.base_score(),
            high_estimate_vector: self.high_estimate.vector_string(),
            high_estimate_score: self.high_estimate.base_score(),
            estimated_base_score: self.estimated_base_score,
            estimated_severity: self.estimated_severity,
            generated_at: Utc::now(),
        }
    }
}

/// Map v3.1 base metrics onto a v4.0 vector for a given AT assumption.
fn derive_v4(source: &CvssV31Vector, at: AttackRequirements) -> CvssV4Vector {
    let scope_changed = source.scope == Scope::Changed;

    // Scope changed: same impact assumed on subsequent systems.
    // Scope unchanged: no subsequent impact assumed.
    let subsequent = |impact: Impact| if scope_changed { impact } else { Impact::None };

    CvssV4Vector {
        attack_vector: source.attack_vector,
        attack_complexity: source.attack_complexity,
        attack_requirements: at,
        privileges_required: source.privileges_required,
        user_interaction: match source.user_interaction {
            v31::UserInteraction::None => UserInteraction::None,
            // v4.0 has no direct equivalent of "Required"; Active is the
            // closest category.
            v31::UserInteraction::Required => UserInteraction::Active,
        },
        vulnerable_confidentiality: source.confidentiality,
        vulnerable_integrity: source.integrity,
        vulnerable_availability: source.availability,
        subsequent_confidentiality: subsequent(source.confidentiality),
        subsequent_integrity: subsequent(source.integrity),
        subsequent_availability: subsequent(source.availability),
    }
}

/// Flattened estimate, serialized into `estimate_<id>_cvss4.json` dumps.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub cve_id: Option<String>,
    pub original_vector: String,
    pub original_base_score: f64,
    pub low_estimate_vector: String,
    pub low_estimate_score: f64,
    pub high_estimate_vector: String,
    pub high_estimate_score: f64,
    pub estimated_base_score: f64,
    pub estimated_severity: Severity,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(vector: &str) -> CvssV4Estimate {
        CvssV4Estimate::from_vector_string(vector).unwrap()
    }

    #[test]
    fn test_unchanged_scope_clears_subsequent_impact() {
        let e = estimate("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:L/A:H");
        for v4 in [e.low_estimate(), e.high_estimate()] {
            assert_eq!(v4.subsequent_confidentiality, Impact::None);
            assert_eq!(v4.subsequent_integrity, Impact::None);
            assert_eq!(v4.subsequent_availability, Impact::None);
        }
    }

    #[test]
    fn test_changed_scope_mirrors_impact() {
        let e = estimate("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:C/C:H/I:L/A:N");
        for v4 in [e.low_estimate(), e.high_estimate()] {
            assert_eq!(v4.subsequent_confidentiality, Impact::High);
            assert_eq!(v4.subsequent_integrity, Impact::Low);
            assert_eq!(v4.subsequent_availability, Impact::None);
            assert_eq!(v4.subsequent_confidentiality, v4.vulnerable_confidentiality);
            assert_eq!(v4.subsequent_integrity, v4.vulnerable_integrity);
            assert_eq!(v4.subsequent_availability, v4.vulnerable_availability);
        }
    }

    #[test]
    fn test_estimates_differ_only_in_at() {
        let e = estimate("CVSS:3.1/AV:A/AC:H/PR:L/UI:R/S:C/C:L/I:L/A:L");
        let low = e.low_estimate();
        let high = e.high_estimate();

        assert_eq!(low.attack_requirements, AttackRequirements::None);
        assert_eq!(high.attack_requirements, AttackRequirements::Present);

        let mut high_with_low_at = *high;
        high_with_low_at.attack_requirements = AttackRequirements::None;
        assert_eq!(&high_with_low_at, low);
    }

    #[test]
    fn test_estimated_score_is_mean() {
        let e = estimate("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H");
        let mean = (e.low_estimate().base_score() + e.high_estimate().base_score()) / 2.0;
        assert!((e.estimated_base_score() - mean).abs() < 1e-9);
    }

    #[test]
    fn test_ui_required_maps_to_active() {
        let e = estimate("CVSS:3.1/AV:N/AC:L/PR:N/UI:R/S:U/C:L/I:L/A:L");
        assert_eq!(e.low_estimate().user_interaction, UserInteraction::Active);
        assert!(e.low_estimate().vector_string().contains("/UI:A/"));
    }

    #[test]
    fn test_ui_none_carries_over() {
        let e = estimate("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:L/I:L/A:L");
        assert_eq!(e.low_estimate().user_interaction, UserInteraction::None);
    }

    #[test]
    fn test_low_estimate_anchored_to_v31_score() {
        let original = "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H";
        let e = estimate(original);
        assert_eq!(
            e.low_estimate().base_score(),
            CvssV31Vector::parse(original).unwrap().base_score()
        );
    }

    #[test]
    fn test_zero_impact_estimate_is_none_severity() {
        let e = estimate("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N");
        assert_eq!(e.estimated_base_score(), 0.0);
        assert_eq!(e.estimated_severity(), Severity::None);
    }

    #[test]
    fn test_malformed_vector_propagates() {
        assert!(CvssV4Estimate::from_vector_string("CVSS:3.1/AV:N").is_err());
        assert!(CvssV4Estimate::from_vector_string("not a vector").is_err());
    }

    #[test]
    fn test_report_carries_both_vectors() {
        let e = estimate("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:C/C:H/I:H/A:H");
        let report = e.to_report(Some("CVE-2021-30737"));
        assert_eq!(report.cve_id.as_deref(), Some("CVE-2021-30737"));
        assert!(report.low_estimate_vector.contains("/AT:N/"));
        assert!(report.high_estimate_vector.contains("/AT:P/"));
    }
}
