//! Port for user persistence adapters.

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, StoredUser, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// The unique-email constraint rejected the write.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

/// Keyed document store for user records with a unique index on email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; fails with [`UserRepositoryError::DuplicateEmail`]
    /// when the email is already taken. The uniqueness check and the write
    /// are atomic from the caller's perspective.
    async fn insert(&self, record: &StoredUser) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<StoredUser>, UserRepositoryError>;

    /// Fetch a user by case-normalized email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredUser>, UserRepositoryError>;
}
