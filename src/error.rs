//! Hard errors.
//!
//! Missing or partial spatial data is never an error here; those cases
//! become [`crate::types::Diagnostic`] entries. An error means the topology
//! itself is corrupted upstream and must not be silently defaulted.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("loop `{loop_id}` references unknown panel `{panel_id}`")]
    UnknownPanel { loop_id: String, panel_id: String },
}
