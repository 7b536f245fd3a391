//! Hospital reference records.
//!
//! The hospital set is seeded once at startup and read-only afterwards; the
//! domain only lists and ranks it.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coordinate-range violations reported by [`Hospital::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum HospitalValidationError {
    /// Latitude outside `[-90, 90]`.
    LatitudeOutOfRange {
        /// The rejected value.
        value: f64,
    },
    /// Longitude outside `[-180, 180]`.
    LongitudeOutOfRange {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for HospitalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatitudeOutOfRange { value } => {
                write!(f, "latitude {value} must be within [-90, 90]")
            }
            Self::LongitudeOutOfRange { value } => {
                write!(f, "longitude {value} must be within [-180, 180]")
            }
        }
    }
}

impl std::error::Error for HospitalValidationError {}

/// A hospital in the reference directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    /// Stable reference identifier.
    pub id: String,
    /// Facility name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Administrative zone the facility sits in.
    pub lga: String,
    /// Beds currently available for admissions.
    pub available_beds: u32,
    /// Clinical expertise tags.
    pub expertise: Vec<String>,
    /// Contact phone number.
    pub phone: String,
    /// Latitude in degrees, `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub longitude: f64,
}

impl Hospital {
    /// Check the coordinate invariants.
    ///
    /// Seeding rejects records that fail this; query-side code may assume it
    /// holds for every stored hospital.
    pub fn validate(&self) -> Result<(), HospitalValidationError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(HospitalValidationError::LatitudeOutOfRange {
                value: self.latitude,
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(HospitalValidationError::LongitudeOutOfRange {
                value: self.longitude,
            });
        }
        Ok(())
    }
}

/// A hospital paired with its great-circle distance from a query point.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedHospital {
    /// The ranked hospital.
    #[serde(flatten)]
    pub hospital: Hospital,
    /// Great-circle distance from the query point, in kilometres.
    pub distance_km: f64,
}
