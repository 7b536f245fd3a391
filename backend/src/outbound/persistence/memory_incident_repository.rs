//! In-memory incident collection with scoped, paginated listing.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::incident::{Incident, PageWindow, TransferUpdate};
use crate::domain::policy::IncidentScope;
use crate::domain::ports::{IncidentRepository, IncidentRepositoryError};

/// Keyed in-memory `incidents` collection.
#[derive(Debug, Default)]
pub struct MemoryIncidentRepository {
    records: RwLock<HashMap<Uuid, Incident>>,
}

#[async_trait]
impl IncidentRepository for MemoryIncidentRepository {
    async fn insert(&self, incident: &Incident) -> Result<(), IncidentRepositoryError> {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        records.insert(incident.id, incident.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Incident>, IncidentRepositoryError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(id).cloned())
    }

    async fn list(
        &self,
        scope: &IncidentScope,
        window: PageWindow,
    ) -> Result<Vec<Incident>, IncidentRepositoryError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut visible: Vec<Incident> = records
            .values()
            .filter(|incident| match scope {
                IncidentScope::All => true,
                IncidentScope::OwnedBy(personnel_id) => incident.personnel_id == *personnel_id,
            })
            .cloned()
            .collect();
        // Most recent first; identifiers break exact-timestamp ties so pages
        // stay stable across calls.
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let skip = usize::try_from(window.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit()).unwrap_or(usize::MAX);
        Ok(visible.into_iter().skip(skip).take(limit).collect())
    }

    async fn update_transfer(
        &self,
        id: &Uuid,
        update: &TransferUpdate,
    ) -> Result<Option<Incident>, IncidentRepositoryError> {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(records.get_mut(id).map(|incident| {
            incident.apply_transfer_update(update);
            incident.clone()
        }))
    }
}
