use crate::models::{Applicant, EligibilityModel};

/// Inclusive age range check
///
/// False when the age or either bound is missing.
#[inline]
pub fn within_age_range(age: Option<i32>, model: &EligibilityModel) -> bool {
    match (age, model.min_age, model.max_age) {
        (Some(age), Some(min_age), Some(max_age)) => {
            let age = i64::from(age);
            age >= min_age && age <= max_age
        }
        _ => false,
    }
}

/// Inclusive income ceiling check
///
/// Only a ceiling is applied; there is no income floor.
#[inline]
pub fn within_income_ceiling(income: Option<i64>, model: &EligibilityModel) -> bool {
    match (income, model.max_income) {
        (Some(income), Some(max_income)) => income <= max_income,
        _ => false,
    }
}

/// Exact, case-sensitive caste comparison
#[inline]
pub fn caste_matches(caste: Option<&str>, model: &EligibilityModel) -> bool {
    match (caste, model.caste.as_deref()) {
        (Some(caste), Some(required)) => caste == required,
        _ => false,
    }
}

/// Gender comparison over the normalised category
#[inline]
pub fn gender_matches(applicant: &Applicant, model: &EligibilityModel) -> bool {
    match (applicant.gender, model.gender_category()) {
        (Some(gender), Some(required)) => gender == required,
        _ => false,
    }
}

/// Conjunction of every criterion for one scheme
#[inline]
pub fn is_eligible(age: Option<i32>, applicant: &Applicant, model: &EligibilityModel) -> bool {
    within_age_range(age, model)
        && within_income_ceiling(applicant.income, model)
        && caste_matches(applicant.caste.as_deref(), model)
        && gender_matches(applicant, model)
}
