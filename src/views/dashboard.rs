use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::models::{Booking, ContactRequest, Profile, Role};
use crate::store::{collections, DocumentStore, Repository, StoreError};

/// Everything the dashboard renders: the caller's profile, their raw
/// bookings and contact requests, and the distinct ids of everyone on the
/// other side of those records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub profile: Profile,
    pub bookings: Vec<Booking>,
    pub contacts: Vec<ContactRequest>,
    pub counterpart_ids: Vec<Uuid>,
}

/// Both retrievals filter on the caller's own-role field: a tutor's records
/// are the ones whose `tutorId` is the tutor, and the ids worth surfacing
/// are the `studentId`s found in them (and vice versa).
fn predicate_field(role: Role) -> &'static str {
    match role {
        Role::Tutor => "tutorId",
        Role::Student => "studentId",
    }
}

/// Load the dashboard for an already-resolved profile.
///
/// The role is taken from the profile passed in; the dependent queries never
/// re-read shared auth state, so a principal change between the two fetches
/// cannot skew the predicate.
pub async fn load_dashboard(
    store: &Arc<dyn DocumentStore>,
    profile: Profile,
) -> Result<DashboardView, StoreError> {
    let field = predicate_field(profile.role());
    let id_value = json!(profile.id());

    let bookings = Repository::<Booking>::new(store.clone(), collections::BOOKINGS);
    let contacts = Repository::<ContactRequest>::new(store.clone(), collections::CONTACT_REQUESTS);
    let (bookings, contacts) = tokio::try_join!(
        bookings.find_all_where(field, &id_value),
        contacts.find_all_where(field, &id_value),
    )?;

    let counterpart_ids = counterpart_ids(profile.role(), &bookings, &contacts);
    Ok(DashboardView {
        profile,
        bookings,
        contacts,
        counterpart_ids,
    })
}

/// Distinct counterpart ids across the bookings-then-contacts union,
/// first-seen order preserved.
pub fn counterpart_ids(
    role: Role,
    bookings: &[Booking],
    contacts: &[ContactRequest],
) -> Vec<Uuid> {
    let from_booking = |booking: &Booking| match role {
        Role::Tutor => booking.student_id,
        Role::Student => booking.tutor_id,
    };
    let from_contact = |contact: &ContactRequest| match role {
        Role::Tutor => contact.student_id,
        Role::Student => contact.tutor_id,
    };

    let mut seen = HashSet::new();
    bookings
        .iter()
        .map(from_booking)
        .chain(contacts.iter().map(from_contact))
        .filter(|id| seen.insert(*id))
        .collect()
}
