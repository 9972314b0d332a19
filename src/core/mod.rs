// Core eligibility exports
pub mod age;
pub mod catalog;
pub mod filters;
pub mod matcher;

pub use age::{age_of, age_on, parse_date_of_birth};
pub use catalog::{CatalogError, SchemeCatalog};
pub use filters::{caste_matches, gender_matches, is_eligible, within_age_range, within_income_ceiling};
pub use matcher::{eligible_schemes, Matcher, MatchResult};
