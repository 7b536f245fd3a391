//! In-memory document-store adapters.
//!
//! Each adapter guards one keyed collection behind a `std::sync::RwLock`,
//! giving the atomic single-document read/write semantics the domain ports
//! require. Locks are never held across an await point.

mod memory_hospital_repository;
mod memory_incident_repository;
mod memory_user_repository;

pub use memory_hospital_repository::MemoryHospitalRepository;
pub use memory_incident_repository::MemoryIncidentRepository;
pub use memory_user_repository::MemoryUserRepository;
