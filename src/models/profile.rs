use std::collections::BTreeMap;

use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, Time};
use uuid::Uuid;
use validator::Validate;

use crate::auth::Principal;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Tutor,
}

/// One bookable slot in a tutor's week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "crate::models::hhmm")]
    pub start: Time,
    #[serde(with = "crate::models::hhmm")]
    pub end: Time,
}

/// Day name (e.g. "monday") to the ordered slots offered on that day.
pub type Availability = BTreeMap<String, Vec<TimeRange>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub subjects: Vec<String>,
    pub hourly_rate: f64,
    pub city: String,
    #[serde(default)]
    pub experience: i32,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A marketplace user record, keyed by the auth principal's id. The `role`
/// discriminator is stored on the document and is immutable after signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    Student(StudentProfile),
    Tutor(TutorProfile),
}

impl Profile {
    pub fn id(&self) -> Uuid {
        match self {
            Profile::Student(profile) => profile.id,
            Profile::Tutor(profile) => profile.id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Profile::Student(_) => Role::Student,
            Profile::Tutor(_) => Role::Tutor,
        }
    }

    #[allow(unused)]
    pub fn name(&self) -> &str {
        match self {
            Profile::Student(profile) => &profile.name,
            Profile::Tutor(profile) => &profile.name,
        }
    }
}

/// Signup payload. Tutor-only fields stay optional here; `into_profile`
/// enforces which ones the chosen role requires.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    #[validate(email)]
    pub email: String,
    pub password: SecretBox<String>,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Hourly rate must not be negative"))]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub experience: Option<i32>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub availability: Option<Availability>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
}

impl NewProfile {
    pub fn into_profile(
        self,
        principal: &Principal,
        created_at: OffsetDateTime,
    ) -> Result<Profile, AppError> {
        match self.role {
            Role::Tutor => {
                if self.subjects.is_empty() {
                    return Err(AppError::Validation(
                        "A tutor profile needs at least one subject".to_string(),
                    ));
                }
                let city = self.city.filter(|c| !c.is_empty()).ok_or_else(|| {
                    AppError::Validation("A tutor profile needs a city".to_string())
                })?;
                Ok(Profile::Tutor(TutorProfile {
                    id: principal.id,
                    email: principal.email.clone(),
                    name: self.name,
                    subjects: self.subjects,
                    hourly_rate: self.hourly_rate.unwrap_or(0.0),
                    city,
                    experience: self.experience.unwrap_or(0),
                    bio: self.bio,
                    availability: self.availability.unwrap_or_default(),
                    created_at,
                }))
            }
            Role::Student => Ok(Profile::Student(StudentProfile {
                id: principal.id,
                email: principal.email.clone(),
                name: self.name,
                subjects: self.subjects,
                grade: self.grade,
                preferred_language: self.preferred_language,
                created_at,
            })),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email)]
    pub email: String,
    pub password: SecretBox<String>,
}
