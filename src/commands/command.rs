// Command trait - interface for all operational modes

use crate::Result;
use async_trait::async_trait;

/// One operational mode of IntelRun, encapsulated as a command object.
///
/// Each command validates its own preconditions, runs its logic and
/// propagates errors; the router in this module picks which one runs.
#[async_trait]
pub trait Command: Send + Sync {
    /// Execute the command asynchronously.
    async fn execute(&self) -> Result<()>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}
