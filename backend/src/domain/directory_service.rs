//! Hospital directory service: listing and proximity ranking.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::hospital::{Hospital, RankedHospital};
use crate::domain::ports::{
    HospitalDirectory, HospitalRepository, HospitalRepositoryError, NearestQuery,
};
use crate::domain::proximity::rank_nearest;

fn map_repository_error(error: HospitalRepositoryError) -> Error {
    match error {
        HospitalRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("hospital store unavailable: {message}"))
        }
        HospitalRepositoryError::Query { message } => {
            Error::internal(format!("hospital store error: {message}"))
        }
    }
}

/// Repository-backed implementation of [`HospitalDirectory`].
#[derive(Clone)]
pub struct HospitalDirectoryService<R> {
    hospitals: Arc<R>,
}

impl<R> HospitalDirectoryService<R> {
    /// Wrap the hospital reference store.
    pub fn new(hospitals: Arc<R>) -> Self {
        Self { hospitals }
    }
}

#[async_trait]
impl<R> HospitalDirectory for HospitalDirectoryService<R>
where
    R: HospitalRepository,
{
    async fn list(&self) -> Result<Vec<Hospital>, Error> {
        self.hospitals.list().await.map_err(map_repository_error)
    }

    async fn nearest(&self, query: NearestQuery) -> Result<Vec<RankedHospital>, Error> {
        let hospitals = self.hospitals.list().await.map_err(map_repository_error)?;
        Ok(rank_nearest(
            query.latitude,
            query.longitude,
            &hospitals,
            query.only_available,
        ))
    }
}
