//! Route handlers organized by resource

pub mod admissions;
pub mod health;
