use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::TutorProfile;
use crate::store::{collections, DocumentStore, Repository, StoreError};

/// Tutor-browse filter state. All three predicates are conjunctive; an
/// empty or unset value means "match all" for that predicate.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TutorFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl TutorFilter {
    fn matches(&self, tutor: &TutorProfile) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = tutor.name.to_lowercase().contains(&term)
            || tutor
                .subjects
                .iter()
                .any(|subject| subject.to_lowercase().contains(&term));

        let matches_subject = match self.subject.as_deref() {
            None | Some("") => true,
            Some(subject) => tutor.subjects.iter().any(|s| s == subject),
        };

        let matches_city = match self.city.as_deref() {
            None | Some("") => true,
            Some(city) => tutor.city == city,
        };

        matches_search && matches_subject && matches_city
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorListing {
    pub tutors: Vec<TutorProfile>,
    pub subjects: Vec<String>,
    pub cities: Vec<String>,
}

/// Filtering preserves retrieval order; no sort is applied.
pub fn filter_tutors<'a>(tutors: &'a [TutorProfile], filter: &TutorFilter) -> Vec<&'a TutorProfile> {
    tutors.iter().filter(|tutor| filter.matches(tutor)).collect()
}

/// Distinct subjects across every tutor's subjects array, first-seen order.
pub fn distinct_subjects(tutors: &[TutorProfile]) -> Vec<String> {
    let mut seen = Vec::new();
    for subject in tutors.iter().flat_map(|tutor| tutor.subjects.iter()) {
        if !seen.contains(subject) {
            seen.push(subject.clone());
        }
    }
    seen
}

/// Distinct cities, first-seen order.
pub fn distinct_cities(tutors: &[TutorProfile]) -> Vec<String> {
    let mut seen = Vec::new();
    for tutor in tutors {
        if !seen.contains(&tutor.city) {
            seen.push(tutor.city.clone());
        }
    }
    seen
}

pub async fn load_listing(
    store: &Arc<dyn DocumentStore>,
    filter: &TutorFilter,
) -> Result<TutorListing, StoreError> {
    let tutors = Repository::<TutorProfile>::new(store.clone(), collections::USERS);
    let all = tutors.find_all_where("role", &json!("tutor")).await?;

    // Facets come from the unfiltered set so the options don't shrink as
    // the user narrows the listing.
    let subjects = distinct_subjects(&all);
    let cities = distinct_cities(&all);
    let tutors = filter_tutors(&all, filter).into_iter().cloned().collect();

    Ok(TutorListing {
        tutors,
        subjects,
        cities,
    })
}
