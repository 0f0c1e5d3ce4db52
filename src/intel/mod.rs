// Threat-model intelligence - MITRE ATT&CK and ATLAS

pub mod atlas;
pub mod attack;
pub mod stix;

pub use atlas::{AtlasClient, AtlasDocument};
pub use attack::{AttackClient, AttackDomain};
pub use stix::{GroupRef, StixBundle, StixObject, StixStore};
