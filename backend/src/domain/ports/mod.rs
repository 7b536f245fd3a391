//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`IdentityService`], [`IncidentLedger`],
//! [`HospitalDirectory`]) are implemented by domain services and consumed by
//! inbound adapters. Driven ports ([`UserRepository`],
//! [`IncidentRepository`], [`HospitalRepository`]) are implemented by
//! outbound persistence adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod hospital_directory;
mod hospital_repository;
mod identity_service;
mod incident_ledger;
mod incident_repository;
mod user_repository;

pub use hospital_directory::{HospitalDirectory, NearestQuery};
#[cfg(test)]
pub use hospital_repository::MockHospitalRepository;
pub use hospital_repository::{HospitalRepository, HospitalRepositoryError};
pub use identity_service::{IdentityService, LoginOutcome, RegistrationRequest};
pub use incident_ledger::IncidentLedger;
#[cfg(test)]
pub use incident_repository::MockIncidentRepository;
pub use incident_repository::{IncidentRepository, IncidentRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
