use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime, Time};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub student_id: Uuid,
    pub subject: String,
    #[serde(with = "crate::models::iso_date")]
    pub date: Date,
    #[serde(with = "crate::models::hhmm")]
    pub start_time: Time,
    #[serde(with = "crate::models::hhmm")]
    pub end_time: Time,
    pub status: BookingStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub tutor_id: Uuid,
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: String,
    #[serde(with = "crate::models::iso_date")]
    pub date: Date,
    #[serde(with = "crate::models::hhmm")]
    pub start_time: Time,
    #[validate(range(min = 1, max = 12, message = "Duration must be between 1 and 12 hours"))]
    pub duration_hours: i64,
}

impl NewBooking {
    pub fn end_time(&self) -> Time {
        self.start_time + Duration::hours(self.duration_hours)
    }

    /// Bookings are created pending; no code path here transitions them.
    pub fn into_booking(self, id: Uuid, student_id: Uuid, created_at: OffsetDateTime) -> Booking {
        let end_time = self.end_time();
        Booking {
            id,
            tutor_id: self.tutor_id,
            student_id,
            subject: self.subject,
            date: self.date,
            start_time: self.start_time,
            end_time,
            status: BookingStatus::Pending,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    #[test]
    fn end_time_is_start_plus_duration() {
        let booking = NewBooking {
            tutor_id: Uuid::new_v4(),
            subject: "Math".to_string(),
            date: date!(2024 - 06 - 01),
            start_time: time!(10:00),
            duration_hours: 2,
        };
        assert_eq!(booking.end_time(), time!(12:00));
    }

    #[test]
    fn booking_documents_use_the_stored_wire_shape() {
        let booking = NewBooking {
            tutor_id: Uuid::new_v4(),
            subject: "Math".to_string(),
            date: date!(2024 - 06 - 01),
            start_time: time!(10:00),
            duration_hours: 1,
        }
        .into_booking(
            Uuid::new_v4(),
            Uuid::new_v4(),
            datetime!(2024-05-01 12:00 UTC),
        );

        let doc = serde_json::to_value(&booking).unwrap();
        assert_eq!(doc["date"], "2024-06-01");
        assert_eq!(doc["startTime"], "10:00");
        assert_eq!(doc["endTime"], "11:00");
        assert_eq!(doc["status"], "pending");
        assert!(doc["tutorId"].is_string());

        let parsed: Booking = serde_json::from_value(doc).unwrap();
        assert_eq!(parsed.status, BookingStatus::Pending);
        assert_eq!(parsed.start_time, time!(10:00));
    }

    #[test]
    fn new_booking_parses_camel_case_payloads() {
        let payload: NewBooking = serde_json::from_value(serde_json::json!({
            "tutorId": Uuid::new_v4().to_string(),
            "subject": "Physics",
            "date": "2024-06-01",
            "startTime": "09:30",
            "durationHours": 3,
        }))
        .unwrap();
        assert_eq!(payload.end_time(), time!(12:30));
    }
}
