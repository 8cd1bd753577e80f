use async_trait::async_trait;

use crate::{error::Result, types::RenameRequest};

/// Remote file operations on a game server
///
/// Implementors perform the rename on the server's filesystem. Network,
/// permission and conflict failures are all reported as errors; callers do
/// not distinguish between them.
#[async_trait]
pub trait FileOperations: Send + Sync {
    /// Rename or move `request.rename_from` to `request.rename_to`
    async fn rename_file(&self, server: &str, request: &RenameRequest) -> Result<()>;

    /// Get a human-readable identifier for this backend (for logging/debugging)
    fn identifier(&self) -> String;
}
