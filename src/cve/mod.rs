// CVE module - NVD record model and API client

pub mod client;
pub mod record;

pub use client::NvdClient;
pub use record::{CveRecord, CvssVersion, Description};
