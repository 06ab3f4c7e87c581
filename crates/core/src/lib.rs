//! Domain types and pure business logic for the Platewise meal log.
//!
//! This crate has no database or network dependencies. Storage and HTTP
//! layers load data, hand it to the functions here, and persist whatever
//! comes back.

pub mod challenge;
pub mod cuisine;
pub mod error;
pub mod meal;
pub mod types;
