//! The built-in tables. Order is the preferred display order in reports.

use super::types::{NameTable, Namespace, entries_are_valid};

/// Model identifier -> display name.
pub const MODEL_ENTRIES: &[(&str, &str)] = &[
    ("count_mimic", "GBM"),
    ("clmbr_stanford", "CLMBR"),
    ("clmbr_stanford_cp", "CLMBR_DAPT"),
    ("clmbr_mimic", "CLMBR_MIMIC"),
];

/// Clinical task identifier -> display name.
pub const TASK_ENTRIES: &[(&str, &str)] = &[
    ("long_los_sql", "Long LOS"),
    ("thrombocytopenia_lab_sql", "Thrombocytopenia"),
    ("hyponatremia_lab_sql", "Hyponatremia"),
    ("anemia_lab_sql", "Anemia"),
    ("mortality_sql", "In-hospital Mortality"),
    ("hyperkalemia_lab_sql", "Hyperkalemia"),
    ("readmission_sql", "30-day Readmission"),
    ("hypoglycemia_lab_sql", "Hypoglycemia"),
];

const _: () = assert!(
    entries_are_valid(MODEL_ENTRIES),
    "model names must have unique, non-empty keys and non-empty labels"
);
const _: () = assert!(
    entries_are_valid(TASK_ENTRIES),
    "task names must have unique, non-empty keys and non-empty labels"
);

pub const MODEL_NAMES: NameTable = NameTable::new(Namespace::Model, MODEL_ENTRIES);
pub const TASK_NAMES: NameTable = NameTable::new(Namespace::Task, TASK_ENTRIES);
