//! Incident ledger service: create, list, and transfer updates.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::incident::{
    Incident, IncidentDraft, IncidentValidationError, PageWindow, TransferUpdate,
};
use crate::domain::policy::AccessPolicy;
use crate::domain::ports::{
    IncidentLedger, IncidentRepository, IncidentRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::token::Claims;

fn map_incident_repository_error(error: IncidentRepositoryError) -> Error {
    match error {
        IncidentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("incident store unavailable: {message}"))
        }
        IncidentRepositoryError::Query { message } => {
            Error::internal(format!("incident store error: {message}"))
        }
    }
}

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        _ => Error::internal(format!("user store error: {error}")),
    }
}

fn map_validation_error(error: IncidentValidationError) -> Error {
    let field = match &error {
        IncidentValidationError::EmptyPatientName
        | IncidentValidationError::PatientNameTooLong { .. } => "patientName",
        IncidentValidationError::PatientAgeOutOfRange { .. } => "patientAge",
        IncidentValidationError::UnknownPatientSex { .. } => "patientSex",
        IncidentValidationError::EmptyLocation
        | IncidentValidationError::LocationTooLong { .. } => "location",
        IncidentValidationError::UnknownLga { .. } => "lga",
        IncidentValidationError::DescriptionLength { .. } => "description",
        IncidentValidationError::ActionTakenLength { .. } => "actionTaken",
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

/// Repository-backed implementation of [`IncidentLedger`].
#[derive(Clone)]
pub struct IncidentLedgerService<I, U> {
    incidents: Arc<I>,
    users: Arc<U>,
    policy: AccessPolicy,
}

impl<I, U> IncidentLedgerService<I, U> {
    /// Assemble the service from its collaborators.
    pub fn new(incidents: Arc<I>, users: Arc<U>, policy: AccessPolicy) -> Self {
        Self {
            incidents,
            users,
            policy,
        }
    }
}

#[async_trait]
impl<I, U> IncidentLedger for IncidentLedgerService<I, U>
where
    I: IncidentRepository,
    U: UserRepository,
{
    async fn create(&self, draft: IncidentDraft, author: Claims) -> Result<Incident, Error> {
        // The author is stamped from the resolved registry record, never
        // from caller-supplied payload data.
        let Some(record) = self
            .users
            .find_by_id(&author.subject)
            .await
            .map_err(map_user_repository_error)?
        else {
            return Err(Error::not_found("user not found"));
        };

        let incident = Incident::from_draft(draft, &record.user).map_err(map_validation_error)?;
        self.incidents
            .insert(&incident)
            .await
            .map_err(map_incident_repository_error)?;

        info!(
            incident_id = %incident.id,
            personnel_id = %incident.personnel_id,
            lga = %incident.lga,
            "incident recorded"
        );
        Ok(incident)
    }

    async fn list(&self, caller: Claims, window: PageWindow) -> Result<Vec<Incident>, Error> {
        let scope = self.policy.list_scope(&caller);
        self.incidents
            .list(&scope, window)
            .await
            .map_err(map_incident_repository_error)
    }

    async fn update_transfer(
        &self,
        id: Uuid,
        update: TransferUpdate,
        caller: Claims,
    ) -> Result<Incident, Error> {
        let Some(existing) = self
            .incidents
            .find_by_id(&id)
            .await
            .map_err(map_incident_repository_error)?
        else {
            return Err(Error::not_found("incident not found"));
        };
        self.policy.authorize_transfer_update(&caller, &existing)?;

        self.incidents
            .update_transfer(&id, &update)
            .await
            .map_err(map_incident_repository_error)?
            .ok_or_else(|| Error::not_found("incident not found"))
    }
}
