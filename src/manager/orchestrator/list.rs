//! Session listing functionality

use crate::error::Result;
use crate::process::CommandRunner;
use crate::types::agent::ListSessionsResponse;

use super::core::SessionOrchestrator;

impl<R: CommandRunner> SessionOrchestrator<R> {
    /// List live sessions whose identifier starts with `filter_prefix`
    ///
    /// Defaults to the namespace prefix. Zero live sessions (or no running
    /// multiplexer server) is an empty response.
    pub async fn list_sessions(&self, filter_prefix: Option<&str>) -> Result<ListSessionsResponse> {
        let filter = filter_prefix.map(str::trim).filter(|p| !p.is_empty());
        let sessions = self.multiplexer.list_all(filter).await?;

        Ok(ListSessionsResponse {
            count: sessions.len(),
            sessions,
        })
    }
}
