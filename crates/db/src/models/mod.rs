//! Row structs for the `entries`, `entry_dishes`, and `challenges` tables.
//!
//! Each row converts into the matching `platewise_core` domain type, which
//! is what repositories return.

pub mod challenge;
pub mod entry;
