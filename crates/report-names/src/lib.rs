//! Display names for model and clinical task identifiers.
//!
//! Two compiled-in tables translate machine-facing identifiers (`count_mimic`,
//! `readmission_sql`, ...) into the labels shown in reports. Lookups are pure
//! reads; unmapped identifiers are handled by an [`UnknownKeyPolicy`].

pub mod config;
pub mod error;
pub mod names;
pub mod telemetry;

pub use error::NameError;
pub use names::*;
pub use telemetry::init_tracing;
