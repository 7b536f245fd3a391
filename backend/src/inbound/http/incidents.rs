//! Incident ledger handlers.
//!
//! ```text
//! POST  /api/v1/incidents
//! GET   /api/v1/incidents?skip=0&limit=50
//! PATCH /api/v1/incidents/{id}
//! ```
//!
//! All three require a bearer token. Listing is scoped by the caller's role;
//! creation stamps the caller as author regardless of payload content.

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;
use crate::domain::incident::{Incident, IncidentDraft, Lga, PageWindow, PatientSex, TransferUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Incident creation request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentRequestBody {
    /// Patient name, 1-200 characters after normalization.
    pub patient_name: String,
    /// Optional patient age, 0-150.
    pub patient_age: Option<i32>,
    /// Exactly `Male` or `Female`.
    pub patient_sex: String,
    /// Free-text location, 1-500 characters after normalization.
    pub location: String,
    /// One of the accepted administrative zones, case-sensitive.
    pub lga: String,
    /// What happened; 10-2000 characters after normalization.
    pub description: String,
    /// What the responder did; 10-2000 characters after normalization.
    pub action_taken: String,
    /// Whether a hospital transfer is flagged.
    #[serde(default)]
    pub transfer_to_hospital: bool,
    /// Destination hospital id; not checked against the reference set.
    #[serde(default)]
    pub hospital_id: Option<String>,
}

/// Pagination query for incident listings.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListIncidentsQuery {
    /// Records to skip; clamped to `>= 0`.
    #[serde(default)]
    pub skip: i64,
    /// Records to return; clamped to `[1, 100]`, default 50.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    PageWindow::DEFAULT_LIMIT
}

/// Transfer-fields update request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIncidentRequestBody {
    /// New transfer flag.
    pub transfer_to_hospital: bool,
    /// New destination hospital, if any.
    #[serde(default)]
    pub hospital_id: Option<String>,
}

fn parse_draft(body: CreateIncidentRequestBody) -> Result<IncidentDraft, Error> {
    let patient_sex: PatientSex = body.patient_sex.parse().map_err(|error| {
        Error::invalid_request(format!("{error}")).with_details(json!({
            "field": "patientSex",
            "value": body.patient_sex,
            "code": "unknown_patient_sex",
        }))
    })?;
    let lga = Lga::new(&body.lga).map_err(|error| {
        Error::invalid_request(error.to_string()).with_details(json!({
            "field": "lga",
            "value": body.lga,
            "code": "unknown_lga",
        }))
    })?;
    Ok(IncidentDraft {
        patient_name: body.patient_name,
        patient_age: body.patient_age,
        patient_sex,
        location: body.location,
        lga,
        description: body.description,
        action_taken: body.action_taken,
        transfer_to_hospital: body.transfer_to_hospital,
        hospital_id: body.hospital_id,
    })
}

/// Record a new incident authored by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/incidents",
    request_body = CreateIncidentRequestBody,
    responses(
        (status = 200, description = "Incident recorded", body = Incident),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Authoring user no longer exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["incidents"],
    operation_id = "createIncident"
)]
#[post("/incidents")]
pub async fn create_incident(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<CreateIncidentRequestBody>,
) -> ApiResult<web::Json<Incident>> {
    let claims = auth.require()?.clone();
    let draft = parse_draft(payload.into_inner())?;
    let incident = state.incidents.create(draft, claims).await?;
    Ok(web::Json(incident))
}

/// List incidents visible to the caller, most recent first.
///
/// Personnel see only their own records; administrators see everything.
#[utoipa::path(
    get,
    path = "/api/v1/incidents",
    params(ListIncidentsQuery),
    responses(
        (status = 200, description = "Incidents in scope", body = [Incident]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["incidents"],
    operation_id = "listIncidents"
)]
#[get("/incidents")]
pub async fn list_incidents(
    state: web::Data<HttpState>,
    auth: AuthContext,
    query: web::Query<ListIncidentsQuery>,
) -> ApiResult<web::Json<Vec<Incident>>> {
    let claims = auth.require()?.clone();
    let window = PageWindow::clamped(query.skip, query.limit);
    let incidents = state.incidents.list(claims, window).await?;
    Ok(web::Json(incidents))
}

/// Overwrite an incident's transfer fields.
///
/// Every other field is immutable after creation.
#[utoipa::path(
    patch,
    path = "/api/v1/incidents/{id}",
    params(("id" = String, Path, description = "Incident identifier")),
    request_body = UpdateIncidentRequestBody,
    responses(
        (status = 200, description = "Refreshed incident", body = Incident),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Update denied by policy", body = Error),
        (status = 404, description = "Incident not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["incidents"],
    operation_id = "updateIncidentTransfer"
)]
#[patch("/incidents/{id}")]
pub async fn update_incident_transfer(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
    payload: web::Json<UpdateIncidentRequestBody>,
) -> ApiResult<web::Json<Incident>> {
    let claims = auth.require()?.clone();
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let body = payload.into_inner();
    let update = TransferUpdate {
        transfer_to_hospital: body.transfer_to_hospital,
        hospital_id: body.hospital_id,
    };
    let incident = state.incidents.update_transfer(id, update, claims).await?;
    Ok(web::Json(incident))
}
