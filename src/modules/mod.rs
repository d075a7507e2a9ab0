pub mod auth;
pub mod bookings;
pub mod contacts;
pub mod dashboard;
pub mod tutors;

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::error::AppError;

/// Client-supplied idempotency token for write endpoints. When present, the
/// document is upserted under this id, so a network retry overwrites the
/// same document instead of creating a second one.
pub(crate) fn idempotency_key(headers: &HeaderMap) -> Result<Option<Uuid>, AppError> {
    match headers.get("Idempotency-Key") {
        None => Ok(None),
        Some(value) => {
            let text = value.to_str().map_err(|_| {
                AppError::Validation("Idempotency-Key must be a UUID".to_string())
            })?;
            let id = Uuid::parse_str(text).map_err(|_| {
                AppError::Validation("Idempotency-Key must be a UUID".to_string())
            })?;
            Ok(Some(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_header_means_no_key() {
        assert_eq!(idempotency_key(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn a_uuid_header_is_accepted() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            "Idempotency-Key",
            HeaderValue::from_str(&id.to_string()).unwrap(),
        );
        assert_eq!(idempotency_key(&headers).unwrap(), Some(id));
    }

    #[test]
    fn a_malformed_key_is_a_validation_error() {
        let mut headers = HeaderMap::new();
        headers.insert("Idempotency-Key", HeaderValue::from_static("not-a-uuid"));
        assert!(matches!(
            idempotency_key(&headers),
            Err(AppError::Validation(_))
        ));
    }
}
