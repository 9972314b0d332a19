// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Address, Applicant, EligibilityModel, Gender, Role, SchemeRecord, User};
pub use requests::{LoginRequest, RegisterRequest};
pub use responses::{AuthResponse, CatalogResponse, ErrorResponse, HealthResponse, SchemesResponse, UserView};
