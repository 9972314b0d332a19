//! Yojana Match - citizen registration and government scheme eligibility service
//!
//! The core is a pure rule engine: an applicant's age, income, caste and
//! gender are checked against every scheme in an immutable catalog snapshot,
//! and the matching schemes are returned in catalog order. Around it sit an
//! actix-web HTTP layer, a user store and bcrypt credential hashing.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{age_on, eligible_schemes, Matcher, SchemeCatalog};
pub use models::{Applicant, EligibilityModel, Gender, SchemeRecord};
