use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::age::parse_date_of_birth;
use crate::models::domain::{Address, Gender};

/// Registration payload
///
/// Fields default when absent so that validation can report every missing
/// field instead of failing on the first one during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub middle_name: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub father_or_husband_name: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(default)]
    pub mobile_number: String,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub dob: Option<String>,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub caste: String,
    #[validate(required, range(min = 0))]
    #[serde(default)]
    pub income: Option<i64>,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub aadhar_number: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub pan_number: String,
    #[validate(length(min = 6))]
    #[serde(default)]
    pub password: Option<String>,
    #[validate(nested)]
    #[serde(default)]
    pub address: Address,
}

impl RegisterRequest {
    /// Date of birth, if present and parseable
    pub fn date_of_birth(&self) -> Option<chrono::NaiveDate> {
        self.dob.as_deref().and_then(parse_date_of_birth)
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    match Gender::parse(gender) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("unknown_gender")),
    }
}

/// Login payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Both credentials, when neither is missing or blank
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let mobile = self.mobile_number.as_deref().filter(|m| !m.trim().is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((mobile.trim(), password))
    }
}
