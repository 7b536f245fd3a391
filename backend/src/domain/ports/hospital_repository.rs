//! Port for the hospital reference set.

use async_trait::async_trait;

use crate::domain::hospital::Hospital;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by hospital repository adapters.
    pub enum HospitalRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "hospital store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "hospital store query failed: {message}",
    }
}

/// Read-mostly store for the hospital reference set.
///
/// Written only by startup seeding; every other caller just reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HospitalRepository: Send + Sync {
    /// Number of stored hospitals.
    async fn count(&self) -> Result<usize, HospitalRepositoryError>;

    /// Append the given hospitals; used once at startup when empty.
    async fn insert_many(&self, hospitals: &[Hospital]) -> Result<(), HospitalRepositoryError>;

    /// Every stored hospital.
    async fn list(&self) -> Result<Vec<Hospital>, HospitalRepositoryError>;
}
