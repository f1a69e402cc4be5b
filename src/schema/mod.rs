//! Cycle record input schema
//!
//! This module defines the loosely typed record shape received from the data
//! store and the adapter that validates it into engine-ready [`CycleRecord`]s.
//!
//! [`CycleRecord`]: crate::types::CycleRecord

mod raw_record;
mod adapter;

pub use raw_record::*;
pub use adapter::*;
