//! Post-write processing that runs after a request's primary change.

pub mod challenge_progress;
