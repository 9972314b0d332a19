use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{Address, Role, SchemeRecord, User};

/// User as returned to clients, without credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub middle_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_or_husband_name: Option<String>,
    pub mobile_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub gender: String,
    pub dob: NaiveDate,
    pub caste: String,
    pub income: i64,
    pub aadhar_number: String,
    pub pan_number: String,
    pub address: Address,
    pub role: Role,
    pub scheme_eligibility: Vec<SchemeRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            middle_name: user.middle_name.clone(),
            last_name: user.last_name.clone(),
            father_or_husband_name: user.father_or_husband_name.clone(),
            mobile_number: user.mobile_number.clone(),
            email: user.email.clone(),
            gender: user.gender.clone(),
            dob: user.dob,
            caste: user.caste.clone(),
            income: user.income,
            aadhar_number: user.aadhar_number.clone(),
            pan_number: user.pan_number.clone(),
            address: user.address.clone(),
            role: user.role,
            scheme_eligibility: user.scheme_eligibility.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response for register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserView,
}

/// Response for a user's scheme lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemesResponse {
    pub message: String,
    pub scheme_eligibility: Vec<SchemeRecord>,
}

/// Full catalog listing
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse<'a> {
    pub message: &'static str,
    pub data: &'a [SchemeRecord],
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
    pub schemes: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }

    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(error, message, 400)
    }

    pub fn unauthorized(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(error, message, 401)
    }

    pub fn not_found(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(error, message, 404)
    }

    pub fn internal(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(error, message, 500)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for ErrorResponse {}
