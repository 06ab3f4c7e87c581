pub mod challenges;
pub mod entries;
pub mod places;
