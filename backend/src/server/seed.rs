//! Startup seeding of the hospital reference set.
//!
//! The directory ships with a fixed reference set and only seeds it into an
//! empty store; an already-populated store is left untouched, so redeploys
//! never clobber operator edits.

use tracing::{info, warn};

use crate::domain::hospital::Hospital;
use crate::domain::ports::{HospitalRepository, HospitalRepositoryError};

fn hospital(
    id: &str,
    name: &str,
    address: &str,
    lga: &str,
    available_beds: u32,
    expertise: &[&str],
    phone: &str,
    latitude: f64,
    longitude: f64,
) -> Hospital {
    Hospital {
        id: id.to_owned(),
        name: name.to_owned(),
        address: address.to_owned(),
        lga: lga.to_owned(),
        available_beds,
        expertise: expertise.iter().map(|&tag| tag.to_owned()).collect(),
        phone: phone.to_owned(),
        latitude,
        longitude,
    }
}

/// The shipped hospital reference set.
pub fn reference_hospitals() -> Vec<Hospital> {
    vec![
        hospital(
            "hosp-1",
            "Lagos State University Teaching Hospital (LASUTH)",
            "1-5 Oba Akinjobi Way, Ikeja",
            "Ikeja",
            45,
            &["Trauma", "Surgery", "Emergency", "Cardiology", "Pediatrics"],
            "01-773-6120",
            6.5964,
            3.3486,
        ),
        hospital(
            "hosp-2",
            "Lagos Island General Hospital",
            "Lagos Island",
            "Lagos Island",
            28,
            &["Emergency", "Surgery", "Obstetrics"],
            "01-263-3721",
            6.4541,
            3.3947,
        ),
        hospital(
            "hosp-3",
            "General Hospital Gbagada",
            "Gbagada Expressway",
            "Kosofe",
            32,
            &["Trauma", "Pediatrics", "Obstetrics", "Emergency"],
            "01-763-2109",
            6.5533,
            3.3786,
        ),
        hospital(
            "hosp-4",
            "Ikorodu General Hospital",
            "Ikorodu Town",
            "Ikorodu",
            18,
            &["Emergency", "Surgery", "Pediatrics"],
            "01-891-2034",
            6.6198,
            3.5073,
        ),
        hospital(
            "hosp-5",
            "General Hospital Badagry",
            "Badagry Town",
            "Badagry",
            15,
            &["Emergency", "Trauma", "Surgery"],
            "01-891-5678",
            6.4173,
            2.8876,
        ),
        hospital(
            "hosp-6",
            "General Hospital Surulere",
            "Randle Avenue, Surulere",
            "Surulere",
            25,
            &["Cardiology", "Emergency", "Surgery", "Neurology"],
            "01-583-7421",
            6.4968,
            3.3547,
        ),
        hospital(
            "hosp-7",
            "Apapa General Hospital",
            "Apapa Road",
            "Apapa",
            12,
            &["Emergency", "Trauma"],
            "01-587-2134",
            6.4509,
            3.3594,
        ),
        hospital(
            "hosp-8",
            "Epe General Hospital",
            "Epe Town",
            "Epe",
            10,
            &["Emergency", "Obstetrics", "Pediatrics"],
            "01-705-8291",
            6.5833,
            3.9833,
        ),
    ]
}

/// Seed the reference set into `repo` when it is empty.
///
/// Returns the number of hospitals written (zero when the store was already
/// populated).
pub async fn seed_hospitals_if_empty<R>(repo: &R) -> Result<usize, HospitalRepositoryError>
where
    R: HospitalRepository,
{
    if repo.count().await? > 0 {
        info!("hospital reference data already present, skipping seed");
        return Ok(0);
    }

    let hospitals: Vec<Hospital> = reference_hospitals()
        .into_iter()
        .filter(|candidate| match candidate.validate() {
            Ok(()) => true,
            Err(error) => {
                warn!(hospital_id = %candidate.id, %error, "dropping invalid seed record");
                false
            }
        })
        .collect();

    repo.insert_many(&hospitals).await?;
    info!(count = hospitals.len(), "seeded hospital reference data");
    Ok(hospitals.len())
}
