//! Checkin Checker - matches Foursquare check-ins against OpenStreetMap
//!
//! This library decides whether the venue of a check-in already exists in
//! OpenStreetMap and composes an email asking the user to add or enrich it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{similarity, CheckError, CheckReport, Checker, CheckerSettings};
pub use crate::models::{CandidateFeature, Checkin, Decision, Outcome, User};
