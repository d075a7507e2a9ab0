use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

/// Fire-and-forget message to a tutor. No read or response state exists;
/// the record never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub student_id: Uuid,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewContactRequest {
    pub tutor_id: Uuid,
    #[validate(length(min = 1, message = "Message must not be empty"))]
    pub message: String,
}

impl NewContactRequest {
    pub fn into_request(
        self,
        id: Uuid,
        student_id: Uuid,
        created_at: OffsetDateTime,
    ) -> ContactRequest {
        ContactRequest {
            id,
            tutor_id: self.tutor_id,
            student_id,
            message: self.message,
            created_at,
        }
    }
}
