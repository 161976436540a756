//! Domain layer: measurement value objects and ballistic statistics.
//!
//! Nothing here performs I/O or knows about JSON.

pub mod ballistics;
pub mod shared;
