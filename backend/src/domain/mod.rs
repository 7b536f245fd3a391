//! Domain primitives, aggregates, services, and ports.
//!
//! Types here are transport and persistence agnostic. Invariants live in the
//! constructors; inbound adapters convert raw payloads into these types
//! before any service is consulted, and outbound adapters only see already
//! validated records.

pub mod auth;
pub mod directory_service;
pub mod error;
pub mod hospital;
pub mod identity_service;
pub mod incident;
pub mod incident_service;
pub mod password;
pub mod policy;
pub mod ports;
pub mod proximity;
pub mod rate_limit;
pub mod token;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::directory_service::HospitalDirectoryService;
pub use self::error::{Error, ErrorCode};
pub use self::hospital::{Hospital, HospitalValidationError, RankedHospital};
pub use self::identity_service::IdentityRegistryService;
pub use self::incident::{
    Incident, IncidentDraft, IncidentValidationError, Lga, PageWindow, PatientSex, TransferUpdate,
    VALID_LGAS,
};
pub use self::incident_service::IncidentLedgerService;
pub use self::password::{CredentialHasher, Password, PasswordDigest, PasswordPolicyError};
pub use self::policy::{AccessPolicy, IncidentScope, TransferUpdateAccess};
pub use self::rate_limit::{RateLimitExceeded, RateLimiter, RateQuota};
pub use self::token::{Claims, TokenError, TokenSecret, TokenService};
pub use self::user::{EmailAddress, FullName, Role, StoredUser, User, UserId, UserValidationError};
