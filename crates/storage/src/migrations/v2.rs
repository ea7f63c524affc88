//! Migration v2: explicit per-gauge increment step

pub(super) const STEP_COLUMN: &str = "step";
pub(super) const STEP_COLUMN_DEF: &str = "REAL";
