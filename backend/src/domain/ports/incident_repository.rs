//! Port for incident persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::incident::{Incident, PageWindow, TransferUpdate};
use crate::domain::policy::IncidentScope;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by incident repository adapters.
    pub enum IncidentRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "incident store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "incident store query failed: {message}",
    }
}

/// Keyed document store for incident records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// Persist a new incident.
    async fn insert(&self, incident: &Incident) -> Result<(), IncidentRepositoryError>;

    /// Fetch an incident by identifier.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Incident>, IncidentRepositoryError>;

    /// List incidents within `scope`, ordered by creation timestamp
    /// descending (most recent first), windowed by `window`.
    async fn list(
        &self,
        scope: &IncidentScope,
        window: PageWindow,
    ) -> Result<Vec<Incident>, IncidentRepositoryError>;

    /// Overwrite the two transfer fields of the given incident and return
    /// the refreshed record, or `None` when the id is unknown. Concurrent
    /// updates are last-write-wins.
    async fn update_transfer(
        &self,
        id: &Uuid,
        update: &TransferUpdate,
    ) -> Result<Option<Incident>, IncidentRepositoryError>;
}
