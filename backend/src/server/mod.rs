//! Server assembly: state construction and route registration.

pub mod config;
pub mod seed;

use std::sync::Arc;

use actix_web::web;

use crate::domain::password::CredentialHasher;
use crate::domain::policy::AccessPolicy;
use crate::domain::ports::{HospitalRepository, IncidentRepository, UserRepository};
use crate::domain::rate_limit::RateLimiter;
use crate::domain::token::TokenService;
use crate::domain::{HospitalDirectoryService, IdentityRegistryService, IncidentLedgerService};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{hospitals, incidents, users};

pub use config::{ConfigError, ServerConfig};

/// Wire the domain services over the given repositories.
pub fn build_state<U, I, H>(
    config: &ServerConfig,
    users: Arc<U>,
    incidents: Arc<I>,
    hospitals: Arc<H>,
) -> HttpState
where
    U: UserRepository + 'static,
    I: IncidentRepository + 'static,
    H: HospitalRepository + 'static,
{
    let tokens = Arc::new(TokenService::new(
        &config.token_secret,
        config.token_validity,
    ));
    let policy = AccessPolicy::new(config.transfer_update_access);

    let identity = Arc::new(IdentityRegistryService::new(
        Arc::clone(&users),
        CredentialHasher,
        Arc::clone(&tokens),
        policy,
    ));
    let ledger = Arc::new(IncidentLedgerService::new(incidents, users, policy));
    let directory = Arc::new(HospitalDirectoryService::new(hospitals));

    HttpState {
        identity,
        incidents: ledger,
        hospitals: directory,
        tokens,
        registration_limiter: Arc::new(RateLimiter::new(config.registration_quota)),
        login_limiter: Arc::new(RateLimiter::new(config.login_quota)),
    }
}

/// Register every `/api/v1` route.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(users::register)
            .service(users::login)
            .service(incidents::create_incident)
            .service(incidents::list_incidents)
            .service(incidents::update_incident_transfer)
            .service(hospitals::list_hospitals)
            .service(hospitals::nearby_hospitals),
    );
}
