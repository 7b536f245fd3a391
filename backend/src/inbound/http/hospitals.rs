//! Hospital directory handlers.
//!
//! ```text
//! GET /api/v1/hospitals
//! GET /api/v1/hospitals/nearby?lat=6.5244&lon=3.3792&condition=trauma
//! ```
//!
//! Both endpoints are public: transfer routing must work before anyone has
//! logged in.

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::hospital::{Hospital, RankedHospital};
use crate::domain::ports::NearestQuery;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query parameters for the nearest-hospital ranking.
#[derive(Debug, Deserialize, IntoParams)]
pub struct NearbyQuery {
    /// Query latitude in degrees; out-of-range values degrade gracefully.
    pub lat: f64,
    /// Query longitude in degrees; out-of-range values degrade gracefully.
    pub lon: f64,
    /// Any non-empty value restricts results to hospitals with free beds.
    pub condition: Option<String>,
}

/// List the full hospital reference set.
#[utoipa::path(
    get,
    path = "/api/v1/hospitals",
    responses(
        (status = 200, description = "All hospitals", body = [Hospital]),
        (status = 500, description = "Internal server error")
    ),
    tags = ["hospitals"],
    operation_id = "listHospitals",
    security([])
)]
#[get("/hospitals")]
pub async fn list_hospitals(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Hospital>>> {
    let hospitals = state.hospitals.list().await?;
    Ok(web::Json(hospitals))
}

/// Rank hospitals by proximity to a coordinate, nearest first.
///
/// Returns at most ten results; with a `condition`, hospitals without
/// available beds are dropped before truncation.
#[utoipa::path(
    get,
    path = "/api/v1/hospitals/nearby",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Ranked hospitals", body = [RankedHospital]),
        (status = 400, description = "Malformed coordinates"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["hospitals"],
    operation_id = "nearbyHospitals",
    security([])
)]
#[get("/hospitals/nearby")]
pub async fn nearby_hospitals(
    state: web::Data<HttpState>,
    query: web::Query<NearbyQuery>,
) -> ApiResult<web::Json<Vec<RankedHospital>>> {
    let ranked = state
        .hospitals
        .nearest(NearestQuery {
            latitude: query.lat,
            longitude: query.lon,
            only_available: query.condition.as_deref().is_some_and(|c| !c.is_empty()),
        })
        .await?;
    Ok(web::Json(ranked))
}
