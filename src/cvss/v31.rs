// CVSS v3.1 base metrics, vector-string parsing and base scoring
//
// Only the eight base metrics are modeled; temporal and environmental metrics
// in a vector string are accepted and ignored.

use crate::cvss::Severity;
use crate::error::IntelError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attack Vector (AV)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackVector {
    Network,  // N - 0.85
    Adjacent, // A - 0.62
    Local,    // L - 0.55
    Physical, // P - 0.2
}

impl AttackVector {
    pub fn weight(&self) -> f64 {
        match self {
            AttackVector::Network => 0.85,
            AttackVector::Adjacent => 0.62,
            AttackVector::Local => 0.55,
            AttackVector::Physical => 0.2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackVector::Network => "N",
            AttackVector::Adjacent => "A",
            AttackVector::Local => "L",
            AttackVector::Physical => "P",
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Self, IntelError> {
        match symbol {
            "N" => Ok(AttackVector::Network),
            "A" => Ok(AttackVector::Adjacent),
            "L" => Ok(AttackVector::Local),
            "P" => Ok(AttackVector::Physical),
            other => Err(IntelError::malformed(format!("invalid AV value `{other}`"))),
        }
    }
}

/// Attack Complexity (AC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackComplexity {
    Low,  // L - 0.77
    High, // H - 0.44
}

impl AttackComplexity {
    pub fn weight(&self) -> f64 {
        match self {
            AttackComplexity::Low => 0.77,
            AttackComplexity::High => 0.44,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackComplexity::Low => "L",
            AttackComplexity::High => "H",
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Self, IntelError> {
        match symbol {
            "L" => Ok(AttackComplexity::Low),
            "H" => Ok(AttackComplexity::High),
            other => Err(IntelError::malformed(format!("invalid AC value `{other}`"))),
        }
    }
}

/// Privileges Required (PR)
///
/// The weight depends on whether the scope changes (v3.1) or, for derived
/// v4.0 vectors, whether subsequent-system impact is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivilegesRequired {
    None, // N - 0.85
    Low,  // L - 0.62 (unchanged) / 0.68 (changed)
    High, // H - 0.27 (unchanged) / 0.50 (changed)
}

impl PrivilegesRequired {
    pub fn weight(&self, scope_changed: bool) -> f64 {
        match (self, scope_changed) {
            (PrivilegesRequired::None, _) => 0.85,
            (PrivilegesRequired::Low, false) => 0.62,
            (PrivilegesRequired::Low, true) => 0.68,
            (PrivilegesRequired::High, false) => 0.27,
            (PrivilegesRequired::High, true) => 0.50,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivilegesRequired::None => "N",
            PrivilegesRequired::Low => "L",
            PrivilegesRequired::High => "H",
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Self, IntelError> {
        match symbol {
            "N" => Ok(PrivilegesRequired::None),
            "L" => Ok(PrivilegesRequired::Low),
            "H" => Ok(PrivilegesRequired::High),
            other => Err(IntelError::malformed(format!("invalid PR value `{other}`"))),
        }
    }
}

/// User Interaction (UI)
///
/// v3.1 defines exactly two values; anything else fails to parse, so the
/// v4.0 mapping downstream is total over parsed vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserInteraction {
    None,     // N - 0.85
    Required, // R - 0.62
}

impl UserInteraction {
    pub fn weight(&self) -> f64 {
        match self {
            UserInteraction::None => 0.85,
            UserInteraction::Required => 0.62,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserInteraction::None => "N",
            UserInteraction::Required => "R",
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Self, IntelError> {
        match symbol {
            "N" => Ok(UserInteraction::None),
            "R" => Ok(UserInteraction::Required),
            other => Err(IntelError::malformed(format!("invalid UI value `{other}`"))),
        }
    }
}

/// Scope (S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    Unchanged, // U
    Changed,   // C
}

impl Scope {
    pub fn is_changed(&self) -> bool {
        matches!(self, Scope::Changed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Unchanged => "U",
            Scope::Changed => "C",
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Self, IntelError> {
        match symbol {
            "U" => Ok(Scope::Unchanged),
            "C" => Ok(Scope::Changed),
            other => Err(IntelError::malformed(format!("invalid S value `{other}`"))),
        }
    }
}

/// Impact value for the C/I/A metrics (and the v4.0 VC/VI/VA, SC/SI/SA metrics)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    None, // N - 0.0
    Low,  // L - 0.22
    High, // H - 0.56
}

impl Impact {
    pub fn weight(&self) -> f64 {
        match self {
            Impact::None => 0.0,
            Impact::Low => 0.22,
            Impact::High => 0.56,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::None => "N",
            Impact::Low => "L",
            Impact::High => "H",
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Self, IntelError> {
        match symbol {
            "N" => Ok(Impact::None),
            "L" => Ok(Impact::Low),
            "H" => Ok(Impact::High),
            other => Err(IntelError::malformed(format!(
                "invalid impact value `{other}`"
            ))),
        }
    }
}

/// A parsed CVSS v3.1 vector (base metric group)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvssV31Vector {
    pub attack_vector: AttackVector,
    pub attack_complexity: AttackComplexity,
    pub privileges_required: PrivilegesRequired,
    pub user_interaction: UserInteraction,
    pub scope: Scope,
    pub confidentiality: Impact,
    pub integrity: Impact,
    pub availability: Impact,
}

const VECTOR_PREFIX: &str = "CVSS:3.1";

impl CvssV31Vector {
    /// Parse a vector string of the form
    /// `CVSS:3.1/AV:?/AC:?/PR:?/UI:?/S:?/C:?/I:?/A:?[/...]`.
    ///
    /// Metrics beyond the base group are ignored. Duplicate metrics, missing
    /// base metrics and unknown metric values are malformed-vector errors.
    pub fn parse(vector: &str) -> Result<Self, IntelError> {
        let mut parts = vector.split('/');
        match parts.next() {
            Some(VECTOR_PREFIX) => {}
            _ => {
                return Err(IntelError::malformed(format!(
                    "vector `{vector}` does not start with {VECTOR_PREFIX}"
                )));
            }
        }

        let mut metrics: HashMap<&str, &str> = HashMap::new();
        for part in parts {
            let (key, value) = part.split_once(':').ok_or_else(|| {
                IntelError::malformed(format!("metric `{part}` is not of the form KEY:VALUE"))
            })?;
            if metrics.insert(key, value).is_some() {
                return Err(IntelError::malformed(format!("duplicate metric `{key}`")));
            }
        }

        let take = |key: &str| {
            metrics
                .get(key)
                .copied()
                .ok_or_else(|| IntelError::malformed(format!("vector is missing base metric {key}")))
        };

        Ok(CvssV31Vector {
            attack_vector: AttackVector::from_symbol(take("AV")?)?,
            attack_complexity: AttackComplexity::from_symbol(take("AC")?)?,
            privileges_required: PrivilegesRequired::from_symbol(take("PR")?)?,
            user_interaction: UserInteraction::from_symbol(take("UI")?)?,
            scope: Scope::from_symbol(take("S")?)?,
            confidentiality: Impact::from_symbol(take("C")?)?,
            integrity: Impact::from_symbol(take("I")?)?,
            availability: Impact::from_symbol(take("A")?)?,
        })
    }

    /// Base score per the v3.1 specification, rounded up to one decimal.
    pub fn base_score(&self) -> f64 {
        let iss = 1.0
            - ((1.0 - self.confidentiality.weight())
                * (1.0 - self.integrity.weight())
                * (1.0 - self.availability.weight()));

        let impact = if self.scope.is_changed() {
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
            * self.privileges_required.weight(self.scope.is_changed())
            * self.user_interaction.weight();

        let base = if self.scope.is_changed() {
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
            "CVSS:3.1/AV:{}/AC:{}/PR:{}/UI:{}/S:{}/C:{}/I:{}/A:{}",
            self.attack_vector.as_str(),
            self.attack_complexity.as_str(),
            self.privileges_required.as_str(),
            self.user_interaction.as_str(),
            self.scope.as_str(),
            self.confidentiality.as_str(),
            self.integrity.as_str(),
            self.availability.as_str()
        )
    }
}
