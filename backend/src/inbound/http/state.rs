//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! domain ports and stay testable without real infrastructure.

use std::sync::Arc;

use crate::domain::ports::{HospitalDirectory, IdentityService, IncidentLedger};
use crate::domain::rate_limit::RateLimiter;
use crate::domain::token::TokenService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login use-cases.
    pub identity: Arc<dyn IdentityService>,
    /// Incident create/list/update use-cases.
    pub incidents: Arc<dyn IncidentLedger>,
    /// Hospital listing and proximity ranking.
    pub hospitals: Arc<dyn HospitalDirectory>,
    /// Bearer token verification for the auth extractor.
    pub tokens: Arc<TokenService>,
    /// Per-origin budget for registration attempts.
    pub registration_limiter: Arc<RateLimiter>,
    /// Per-origin budget for login attempts.
    pub login_limiter: Arc<RateLimiter>,
}
