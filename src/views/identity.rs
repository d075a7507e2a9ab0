use std::sync::Arc;

use uuid::Uuid;

use crate::models::Profile;
use crate::store::{collections, DocumentStore, Repository, StoreError};

/// Outcome of resolving an authenticated principal to a marketplace profile.
///
/// Zero matches means the profile document has not propagated yet — signup
/// writes it right after account creation — so the caller keeps its loading
/// state. Absence is indistinguishable from slow propagation here, and must
/// not be reported as not-found.
#[derive(Debug, Clone)]
pub enum Resolution {
    Pending,
    Resolved(Profile),
}

pub async fn resolve_profile(
    store: &Arc<dyn DocumentStore>,
    principal_id: Uuid,
) -> Result<Resolution, StoreError> {
    let profiles = Repository::<Profile>::new(store.clone(), collections::USERS);
    match profiles.find_by_id(principal_id).await? {
        Some(profile) => Ok(Resolution::Resolved(profile)),
        None => Ok(Resolution::Pending),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, StudentProfile};
    use crate::store::MemoryStore;
    use time::macros::datetime;

    fn store() -> Arc<dyn DocumentStore> {
        Arc::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn zero_matches_is_pending_not_an_error() {
        let store = store();
        let resolution = resolve_profile(&store, Uuid::new_v4()).await.unwrap();
        assert!(matches!(resolution, Resolution::Pending));
    }

    #[tokio::test]
    async fn a_stored_profile_resolves() {
        let store = store();
        let id = Uuid::new_v4();
        let profile = Profile::Student(StudentProfile {
            id,
            email: "jo@example.com".to_string(),
            name: "Jo".to_string(),
            subjects: vec![],
            grade: None,
            preferred_language: None,
            created_at: datetime!(2024-05-01 12:00 UTC),
        });
        Repository::<Profile>::new(store.clone(), collections::USERS)
            .upsert(id, &profile)
            .await
            .unwrap();

        match resolve_profile(&store, id).await.unwrap() {
            Resolution::Resolved(found) => {
                assert_eq!(found.id(), id);
                assert_eq!(found.role(), Role::Student);
            }
            Resolution::Pending => panic!("expected the profile to resolve"),
        }
    }
}
