//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and the schemas their payloads
//! reference, plus the bearer-token security scheme used by authenticated
//! operations.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::hospital::{Hospital, RankedHospital};
use crate::domain::incident::{Incident, Lga, PatientSex};
use crate::domain::user::{EmailAddress, FullName, Role, User, UserId};
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::incidents::{CreateIncidentRequestBody, UpdateIncidentRequestBody};
use crate::inbound::http::users::{LoginRequestBody, LoginResponseBody, RegisterRequestBody};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Lifeline backend API",
        description = "Emergency-response incident ledger with role-scoped access, \
                       token-based identity, and nearest-hospital routing."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::incidents::create_incident,
        crate::inbound::http::incidents::list_incidents,
        crate::inbound::http::incidents::update_incident_transfer,
        crate::inbound::http::hospitals::list_hospitals,
        crate::inbound::http::hospitals::nearby_hospitals,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        UserId,
        EmailAddress,
        FullName,
        Role,
        Incident,
        Lga,
        PatientSex,
        Hospital,
        RankedHospital,
        RegisterRequestBody,
        LoginRequestBody,
        LoginResponseBody,
        CreateIncidentRequestBody,
        UpdateIncidentRequestBody,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "incidents", description = "Role-scoped incident ledger"),
        (name = "hospitals", description = "Hospital directory and proximity ranking"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
