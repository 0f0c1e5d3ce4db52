// Commands module - Command pattern for IntelRun's operational modes

mod atlas_sync;
mod attack_sync;
mod attack_versions;
mod command;
mod cve_lookup;
mod router;

pub use atlas_sync::AtlasSyncCommand;
pub use attack_sync::AttackSyncCommand;
pub use attack_versions::AttackVersionsCommand;
pub use command::Command;
pub use cve_lookup::CveLookupCommand;
pub use router::CommandRouter;
