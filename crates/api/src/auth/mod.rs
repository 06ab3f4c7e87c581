//! Bearer-token verification.
//!
//! Users authenticate with an external identity provider; this service only
//! verifies the HS256 tokens it issues.

pub mod jwt;
