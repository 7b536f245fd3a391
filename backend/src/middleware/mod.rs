//! Actix middleware shared by every inbound HTTP route.

pub mod trace;

pub use trace::{Trace, TraceId, TRACE_ID_HEADER};
