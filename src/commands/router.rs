// CommandRouter - routes CLI arguments to the appropriate Command

use super::{AtlasSyncCommand, AttackSyncCommand, AttackVersionsCommand, Command, CveLookupCommand};
use crate::cli::Args;
use crate::Result;

/// Picks the command to execute based on CLI arguments.
///
/// Priority order:
/// 1. ATT&CK release listing (--attack-versions)
/// 2. ATT&CK bundle sync (--attack)
/// 3. ATLAS sync (--atlas)
/// 4. CVE lookup (default)
pub struct CommandRouter;

impl CommandRouter {
    pub fn route(args: Args) -> Result<Box<dyn Command>> {
        if args.attack.list_versions {
            return Ok(Box::new(AttackVersionsCommand::new(args)));
        }

        if args.attack.sync {
            return Ok(Box::new(AttackSyncCommand::new(args)));
        }

        if args.atlas.sync {
            return Ok(Box::new(AtlasSyncCommand::new(args)));
        }

        Ok(Box::new(CveLookupCommand::new(args)))
    }
}
