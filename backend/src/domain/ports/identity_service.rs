//! Driving port for registration and login use-cases.
//!
//! Inbound adapters call this to provision and authenticate accounts without
//! knowing the backing registry, hasher, or token machinery.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::password::Password;
use crate::domain::token::Claims;
use crate::domain::user::{EmailAddress, FullName, Role, User};

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Unique, case-normalized email address.
    pub email: EmailAddress,
    /// Policy-checked plaintext password.
    pub password: Password,
    /// Display name.
    pub full_name: FullName,
    /// Requested role; admin requires an admin requester.
    pub role: Role,
}

/// Successful login result.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Bearer token for subsequent calls.
    pub token: String,
    /// The authenticated user, hash-free.
    pub user: User,
}

/// Domain use-case port for identity management.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Register a new account.
    ///
    /// `requester` carries the caller's verified claims when a token
    /// accompanied the request; it gates admin provisioning.
    async fn register(
        &self,
        request: RegistrationRequest,
        requester: Option<Claims>,
    ) -> Result<User, Error>;

    /// Authenticate credentials and mint a token.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error>;
}
