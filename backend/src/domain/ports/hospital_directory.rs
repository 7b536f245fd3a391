//! Driving port for hospital directory use-cases.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::hospital::{Hospital, RankedHospital};

/// A nearest-hospital query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestQuery {
    /// Query latitude in degrees; not range-validated.
    pub latitude: f64,
    /// Query longitude in degrees; not range-validated.
    pub longitude: f64,
    /// Drop hospitals without available beds before truncation.
    pub only_available: bool,
}

/// Domain use-case port for the hospital directory. Unauthenticated.
#[async_trait]
pub trait HospitalDirectory: Send + Sync {
    /// Every hospital in the reference set.
    async fn list(&self) -> Result<Vec<Hospital>, Error>;

    /// Hospitals ranked by proximity to the query point, at most ten.
    async fn nearest(&self, query: NearestQuery) -> Result<Vec<RankedHospital>, Error>;
}
