//! Name registry: compiled-in identifier -> display name tables and lookups.

pub mod default;
pub mod lookup;
pub mod policy;
pub mod types;

pub use default::{MODEL_ENTRIES, MODEL_NAMES, TASK_ENTRIES, TASK_NAMES};
pub use lookup::*;
pub use policy::*;
pub use types::*;
