use crate::core::{age::age_of, catalog::SchemeCatalog, filters::is_eligible};
use crate::models::{Applicant, SchemeRecord};
use chrono::NaiveDate;
use std::sync::Arc;

/// Result of one eligibility evaluation
#[derive(Debug)]
pub struct MatchResult<'a> {
    pub schemes: Vec<&'a SchemeRecord>,
    pub total_schemes: usize,
    pub age: Option<i32>,
}

impl MatchResult<'_> {
    /// Clone the matched schemes out of the catalog
    pub fn to_owned_schemes(&self) -> Vec<SchemeRecord> {
        self.schemes.iter().map(|&scheme| scheme.clone()).collect()
    }
}

/// Schemes the applicant qualifies for, in catalog order
///
/// Stable filter over the catalog: no sorting and no deduplication. Missing
/// applicant attributes or rule bounds exclude a scheme; nothing here fails.
pub fn eligible_schemes<'c>(
    applicant: &Applicant,
    catalog: &'c SchemeCatalog,
    today: NaiveDate,
) -> Vec<&'c SchemeRecord> {
    let age = age_of(applicant.date_of_birth, today);

    catalog
        .iter()
        .filter(|scheme| {
            let eligible = is_eligible(age, applicant, &scheme.eligibility);
            tracing::trace!(
                scheme = %scheme.title,
                ?age,
                eligible,
                "Evaluated scheme eligibility"
            );
            eligible
        })
        .collect()
}

/// Eligibility matcher bound to a catalog snapshot
///
/// Cheap to clone; every clone shares the same immutable catalog.
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Arc<SchemeCatalog>,
}

impl Matcher {
    pub fn new(catalog: Arc<SchemeCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        &self.catalog
    }

    /// Evaluate the applicant as of the local calendar date
    pub fn find_eligible(&self, applicant: &Applicant) -> MatchResult<'_> {
        self.find_eligible_on(applicant, chrono::Local::now().date_naive())
    }

    /// Evaluate the applicant as of `today`
    pub fn find_eligible_on(&self, applicant: &Applicant, today: NaiveDate) -> MatchResult<'_> {
        MatchResult {
            schemes: eligible_schemes(applicant, &self.catalog, today),
            total_schemes: self.catalog.len(),
            age: age_of(applicant.date_of_birth, today),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(Arc::new(SchemeCatalog::default()))
    }
}
