// IntelRun - Vulnerability intelligence collector
// Copyright (C) 2025 IntelRun Team
// Licensed under GPL-3.0

//! IntelRun collects vulnerability intelligence: CVE records from the NVD
//! API and ATT&CK/ATLAS threat-model data from MITRE CTI. It extracts CVSS
//! v3.1 metrics, estimates CVSS v4.0 scores from v3.1 vectors, and dumps
//! JSON reports to a configurable directory.

pub mod cli;
pub mod commands;
pub mod config;
pub mod cve;
pub mod cvss;
pub mod error;
pub mod intel;
pub mod output;
pub mod utils;

// Re-export commonly used types
pub use crate::cli::Args;
pub use crate::error::IntelError;

/// Result type for IntelRun operations
pub type Result<T> = anyhow::Result<T>;
