//! Session interaction methods
//!
//! Handles sending input to sessions, broadcasting, and killing sessions.
//! Each call re-checks existence through the gateway; nothing is remembered
//! between calls.

use futures::future::join_all;

use crate::error::Result;
use crate::process::CommandRunner;
use crate::types::agent::{BroadcastDelivery, BroadcastResponse, KillResponse, SendResponse};

use super::super::helpers::{PREVIEW_CHARS, preview};
use super::core::SessionOrchestrator;

impl<R: CommandRunner> SessionOrchestrator<R> {
    /// Send text to an agent session, optionally pressing Enter
    ///
    /// # Errors
    /// `SessionNotFound` if the session is gone, `Gateway` if tmux refuses
    pub async fn send(&self, name: &str, text: &str, press_enter: bool) -> Result<SendResponse> {
        let id = self.resolve(name)?;
        self.multiplexer.send_input(&id, text, press_enter).await?;

        Ok(SendResponse {
            success: true,
            sent_to: id,
            text: preview(text, PREVIEW_CHARS),
        })
    }

    /// Kill an agent session
    ///
    /// `force` is accepted for callers that distinguish the two; both paths
    /// are existence-gated and end with `kill-session`.
    ///
    /// # Errors
    /// `SessionNotFound` if the session is gone, `Gateway` if tmux refuses
    pub async fn kill(&self, name: &str, force: bool) -> Result<KillResponse> {
        let id = self.resolve(name)?;
        log::debug!("Killing {id} (force={force})");
        self.multiplexer.destroy(&id).await?;

        Ok(KillResponse {
            success: true,
            killed: id,
        })
    }

    /// Send the same text to every live session in the namespace
    ///
    /// Only identifiers starting with `prefix + separator` are addressed, so a
    /// `hivemind-*` session is left alone under the `hive` prefix. Deliveries
    /// run concurrently; each one reports its own outcome.
    ///
    /// # Errors
    /// Only if the sessions cannot be listed
    pub async fn broadcast(&self, text: &str, press_enter: bool) -> Result<BroadcastResponse> {
        let lead = self.namespace.lead();
        let sessions = self.multiplexer.list_all(Some(&lead)).await?;

        let deliveries = join_all(sessions.into_iter().map(|summary| async move {
            let result = self
                .multiplexer
                .send_input(&summary.name, text, press_enter)
                .await;
            if let Err(ref e) = result {
                log::warn!("Broadcast to {} failed: {e}", summary.name);
            }
            BroadcastDelivery {
                session: summary.name,
                success: result.is_ok(),
                error: result.err().map(|e| e.to_string()),
            }
        }))
        .await;

        let delivered = deliveries.iter().filter(|d| d.success).count();
        Ok(BroadcastResponse {
            failed: deliveries.len() - delivered,
            delivered,
            deliveries,
        })
    }
}
