//! Driving port for incident ledger use-cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::incident::{Incident, IncidentDraft, PageWindow, TransferUpdate};
use crate::domain::token::Claims;

/// Domain use-case port for the incident ledger.
#[async_trait]
pub trait IncidentLedger: Send + Sync {
    /// Validate, normalize, and persist a new incident authored by the
    /// caller identified in `author`.
    async fn create(&self, draft: IncidentDraft, author: Claims) -> Result<Incident, Error>;

    /// List incidents visible to the caller, most recent first.
    async fn list(&self, caller: Claims, window: PageWindow) -> Result<Vec<Incident>, Error>;

    /// Overwrite an incident's transfer fields.
    async fn update_transfer(
        &self,
        id: Uuid,
        update: TransferUpdate,
        caller: Claims,
    ) -> Result<Incident, Error>;
}
