use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Gender categories recognised by scheme rules
///
/// Parsing trims surrounding whitespace and ignores case, so `"Female"`,
/// `" female "` and `"FEMALE"` all resolve to [`Gender::Female`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Transgender,
}

impl Gender {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "transgender" => Some(Gender::Transgender),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Transgender => "transgender",
        }
    }
}

/// Qualification rule attached to a scheme
///
/// Every bound is optional. A missing or mistyped field makes the rule
/// unsatisfiable rather than failing the whole catalog load.
///
/// Canonical field names are `minAge`, `maxAge`, `maxIncome`, `caste` and
/// `gender`. The legacy names `age`, `income` and `Gender` are accepted on
/// input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityModel {
    #[serde(
        rename = "minAge",
        alias = "age",
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_age: Option<i64>,
    #[serde(
        rename = "maxAge",
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_age: Option<i64>,
    #[serde(
        rename = "maxIncome",
        alias = "income",
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_income: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub caste: Option<String>,
    #[serde(
        alias = "Gender",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<String>,
}

impl EligibilityModel {
    /// Gender category this rule requires, if it names a known one
    pub fn gender_category(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::parse)
    }
}

/// One government scheme from the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecord {
    #[serde(default, deserialize_with = "lenient_title")]
    pub title: String,
    #[serde(
        rename = "eligibility",
        alias = "EligibilityModel",
        default,
        deserialize_with = "lenient_model"
    )]
    pub eligibility: EligibilityModel,
    /// Descriptive fields the matcher never reads
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl SchemeRecord {
    pub fn new(title: impl Into<String>, eligibility: EligibilityModel) -> Self {
        Self {
            title: title.into(),
            eligibility,
            details: Map::new(),
        }
    }
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

fn lenient_model<'de, D>(deserializer: D) -> Result<EligibilityModel, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(EligibilityModel::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Demographic attributes evaluated against the catalog
///
/// Built per request from a registration payload or a stored [`User`].
/// Absent attributes never match any criterion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Applicant {
    pub date_of_birth: Option<NaiveDate>,
    pub income: Option<i64>,
    pub caste: Option<String>,
    pub gender: Option<Gender>,
}

impl Applicant {
    pub fn new(date_of_birth: NaiveDate, income: i64, caste: impl Into<String>, gender: Gender) -> Self {
        Self {
            date_of_birth: Some(date_of_birth),
            income: Some(income),
            caste: Some(caste.into()),
            gender: Some(gender),
        }
    }
}

impl From<&User> for Applicant {
    fn from(user: &User) -> Self {
        Self {
            date_of_birth: Some(user.dob),
            income: Some(user.income),
            caste: Some(user.caste.clone()),
            gender: Gender::parse(&user.gender),
        }
    }
}

/// Postal address of a registered user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, validator::Validate)]
pub struct Address {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub state: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub district: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub pincode: String,
    #[validate(length(min = 1))]
    #[serde(rename = "addressLine", default)]
    pub address_line: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Registered citizen as persisted by the user store
///
/// `scheme_eligibility` holds the most recent match result. It is
/// overwritten on every login and scheme lookup and never read back as a
/// substitute for matching.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub middle_name: String,
    pub last_name: String,
    pub father_or_husband_name: Option<String>,
    pub mobile_number: String,
    pub email: Option<String>,
    pub gender: String,
    pub dob: NaiveDate,
    pub caste: String,
    pub income: i64,
    pub aadhar_number: String,
    pub pan_number: String,
    pub password_hash: String,
    pub address: Address,
    pub role: Role,
    pub scheme_eligibility: Vec<SchemeRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
