// CVSS v4.0 vectors for v3.1-derived estimates
//
// Models the eleven base metrics a derived vector carries. Scoring follows the
// same calculator structure as v3.1: per-metric weights, an impact sub-score
// and an exploitability sub-score. Invariant: a vector derived from v3.1 base
// metrics with AT:N reproduces the v3.1 base score of its source; AT:P scales
// exploitability down and brackets the estimate from the other side.

use crate::cvss::v31::{AttackComplexity, AttackVector, Impact, PrivilegesRequired};
use crate::cvss::Severity;
use serde::{Deserialize, Serialize};

/// Attack Requirements (AT) - v4.0 only, no v3.1 analogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackRequirements {
    None,    // N - 1.0 (exploitability unchanged)
    Present, // P - 0.62
}

impl AttackRequirements {
    pub fn weight(&self) -> f64 {
        match self {
            AttackRequirements::None => 1.0,
            AttackRequirements::Present => 0.62,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackRequirements::None => "N",
            AttackRequirements::Present => "P",
        }
    }
}

/// User Interaction (UI) - v4.0 extends the v3.1 value range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserInteraction {
    None,    // N - 0.85
    Passive, // P - 0.68
    Active,  // A - 0.62 (the v3.1 `Required` weight)
}

impl UserInteraction {
    pub fn weight(&self) -> f64 {
        match self {
            UserInteraction::None => 0.85,
            UserInteraction::Passive => 0.68,
            UserInteraction::Active => 0.62,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserInteraction::None => "N",
            UserInteraction::Passive => "P",
            UserInteraction::Active => "A",
        }
    }
}

/// A CVSS v4.0 vector (base metric group)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvssV4Vector {
    pub attack_vector: AttackVector,
    pub attack_complexity: AttackComplexity,
    pub attack_requirements: AttackRequirements,
    pub privileges_required: PrivilegesRequired,
    pub user_interaction: UserInteraction,
    pub vulnerable_confidentiality: Impact,
    pub vulnerable_integrity: Impact,
    pub vulnerable_availability: Impact,
    pub subsequent_confidentiality: Impact,
    pub subsequent_integrity: Impact,
    pub subsequent_availability: Impact,
}

impl CvssV4Vector {
    /// Whether the vector declares any subsequent-system impact.
    ///
    /// Plays the role v3.1's changed scope plays in the scoring formula.
    pub fn has_subsequent_impact(&self) -> bool {
        self.subsequent_impact_score() > 0.0
    }

    fn vulnerable_impact_score(&self) -> f64 {
        1.0 - ((1.0 - self.vulnerable_confidentiality.weight())
            * (1.0 - self.vulnerable_integrity.weight())
            * (1.0 - self.vulnerable_availability.weight()))
    }

    fn subsequent_impact_score(&self) -> f64 {
        1.0 - ((1.0 - self.subsequent_confidentiality.weight())
            * (1.0 - self.subsequent_integrity.weight())
            * (1.0 - self.subsequent_availability.weight()))
    }

    /// Base score, rounded up to one decimal.
    ///
    /// The impact sub-score is driven by the worse of the vulnerable-system
    /// and subsequent-system impacts; when subsequent impact is present the
    /// changed-scope arm of the calculator applies.
    pub fn base_score(&self) -> f64 {
        let iss = self
            .vulnerable_impact_score()
            .max(self.subsequent_impact_score());
        let subsequent = self.has_subsequent_impact();

        let impact = if subsequent {
            7.52 * (iss - 0.029) - 3.25 * (iss - 0.02).powi(15)
        } else {
            6.42 * iss
        };

        if impact <= 0.0 {
            return 0.0;
        }

        let exploitability = 8.22
            * self.attack_vector.weight()
            * self.attack_complexity.weight()
            * self.attack_requirements.weight()
            * self.privileges_required.weight(subsequent)
            * self.user_interaction.weight();

        let base = if subsequent {
            (1.08 * (impact + exploitability)).min(10.0)
        } else {
            (impact + exploitability).min(10.0)
        };

        (base * 10.0).ceil() / 10.0
    }

    pub fn severity(&self) -> Severity {
        Severity::from_score(self.base_score())
    }

    pub fn vector_string(&self) -> String {
        format!(
            "CVSS:4.0/AV:{}/AC:{}/AT:{}/PR:{}/UI:{}/VC:{}/VI:{}/VA:{}/SC:{}/SI:{}/SA:{}",
            self.attack_vector.as_str(),
            self.attack_complexity.as_str(),
            self.attack_requirements.as_str(),
            self.privileges_required.as_str(),
            self.user_interaction.as_str(),
            self.vulnerable_confidentiality.as_str(),
            self.vulnerable_integrity.as_str(),
            self.vulnerable_availability.as_str(),
            self.subsequent_confidentiality.as_str(),
            self.subsequent_integrity.as_str(),
            self.subsequent_availability.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(at: AttackRequirements) -> CvssV4Vector {
        CvssV4Vector {
            attack_vector: AttackVector::Network,
            attack_complexity: AttackComplexity::Low,
            attack_requirements: at,
            privileges_required: PrivilegesRequired::None,
            user_interaction: UserInteraction::None,
            vulnerable_confidentiality: Impact::High,
            vulnerable_integrity: Impact::High,
            vulnerable_availability: Impact::High,
            subsequent_confidentiality: Impact::None,
            subsequent_integrity: Impact::None,
            subsequent_availability: Impact::None,
        }
    }

    #[test]
    fn test_vector_string_layout() {
        let v = vector(AttackRequirements::None);
        assert_eq!(
            v.vector_string(),
            "CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N"
        );
    }

    #[test]
    fn test_at_none_matches_v31_score() {
        use crate::cvss::v31::CvssV31Vector;

        let v31 = CvssV31Vector::parse("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H").unwrap();
        let v4 = vector(AttackRequirements::None);
        assert_eq!(v4.base_score(), v31.base_score());
    }

    #[test]
    fn test_at_present_scores_lower() {
        let optimistic = vector(AttackRequirements::None);
        let pessimistic = vector(AttackRequirements::Present);
        assert!(pessimistic.base_score() < optimistic.base_score());
    }

    #[test]
    fn test_zero_impact_scores_zero() {
        let mut v = vector(AttackRequirements::None);
        v.vulnerable_confidentiality = Impact::None;
        v.vulnerable_integrity = Impact::None;
        v.vulnerable_availability = Impact::None;
        assert_eq!(v.base_score(), 0.0);
        assert_eq!(v.severity(), Severity::None);
    }

    #[test]
    fn test_subsequent_impact_triggers_changed_arm() {
        let mut v = vector(AttackRequirements::None);
        v.subsequent_confidentiality = Impact::High;
        v.subsequent_integrity = Impact::High;
        v.subsequent_availability = Impact::High;
        assert!(v.has_subsequent_impact());
        assert_eq!(v.base_score(), 10.0);
    }
}
