//! Emergency-response incident ledger backend.
//!
//! Field personnel log medical incidents, optionally flagging a hospital
//! transfer; administrators review every record; an open directory ranks
//! hospitals by proximity to an incident. Identity is token based, with
//! role-scoped visibility enforced in the domain layer.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::trace::{Trace, TraceId};
