// CVSS module - vector parsing, base scoring, and v3.1 -> v4.0 estimation
//
// Reference: https://www.first.org/cvss/v3.1/specification-document
//            https://www.first.org/cvss/v4.0/specification-document

pub mod estimator;
pub mod v31;
pub mod v4;

pub use estimator::{CvssV4Estimate, EstimateReport};
pub use v31::CvssV31Vector;
pub use v4::CvssV4Vector;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative severity rating, shared by CVSS v3.1 and v4.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    None,     // 0.0
    Low,      // 0.1 - 3.9
    Medium,   // 4.0 - 6.9
    High,     // 7.0 - 8.9
    Critical, // 9.0 - 10.0
}

impl Severity {
    /// Map a base score onto the qualitative range.
    ///
    /// Thresholds are inclusive upper bounds, so averaged scores that land
    /// between two one-decimal ratings (e.g. 3.95) fall into the higher band.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s == 0.0 => Severity::None,
            s if s <= 3.9 => Severity::Low,
            s if s <= 6.9 => Severity::Medium,
            s if s <= 8.9 => Severity::High,
            _ => Severity::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
