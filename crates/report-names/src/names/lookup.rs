use std::borrow::Cow;

use super::default::{MODEL_NAMES, TASK_NAMES};
use super::policy::UnknownKeyPolicy;
use super::types::NameTable;
use crate::error::NameError;

/// Display name for a model identifier, e.g. `count_mimic` -> `GBM`.
pub fn lookup_model_name(key: &str) -> Result<&'static str, NameError> {
    MODEL_NAMES.lookup(key)
}

/// Display name for a task identifier, e.g. `mortality_sql` -> `In-hospital Mortality`.
pub fn lookup_task_name(key: &str) -> Result<&'static str, NameError> {
    TASK_NAMES.lookup(key)
}

pub fn model_ids() -> Vec<&'static str> {
    MODEL_NAMES.ids().collect()
}

pub fn task_ids() -> Vec<&'static str> {
    TASK_NAMES.ids().collect()
}

/// Report label for a model identifier under the process-wide policy.
/// Never fails; see [`display_or_identifier`].
pub fn model_display_name(key: &str) -> Cow<'_, str> {
    display_or_identifier(&MODEL_NAMES, key)
}

/// Report label for a task identifier under the process-wide policy.
pub fn task_display_name(key: &str) -> Cow<'_, str> {
    display_or_identifier(&TASK_NAMES, key)
}

/// [`display_with`] under [`UnknownKeyPolicy::global`].
pub fn display_or_identifier<'a>(table: &NameTable, key: &'a str) -> Cow<'a, str> {
    display_with(table, key, UnknownKeyPolicy::global())
}

/// Label for `key` under `policy`. Under the `Error` policy a miss is logged
/// at warn and the identifier is shown as-is, so a report never breaks on an
/// unregistered name.
pub fn display_with<'a>(
    table: &NameTable,
    key: &'a str,
    policy: &'a UnknownKeyPolicy,
) -> Cow<'a, str> {
    match table.display(key, policy) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!(namespace = %table.namespace(), "{}; showing identifier", e);
            Cow::Borrowed(key)
        }
    }
}
