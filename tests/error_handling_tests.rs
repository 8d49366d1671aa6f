//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Errors are rendered as a single plain-text line
//! - Accessor errors keep their status code
//! - Error matching allows callers to handle specific cases

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use burrow::prelude::*;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_not_allowed_returns_500() {
        let err = BurrowError::NotAllowed {
            resource: "book".to_string(),
            operation: Operation::Create,
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_untyped_accessor_error_returns_500() {
        assert_eq!(
            BurrowError::new("disk full").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_accessor_status_passes_through() {
        for status in [StatusCode::NOT_FOUND, StatusCode::CONFLICT, StatusCode::GONE] {
            assert_eq!(BurrowError::api(status, "nope").status_code(), status);
        }
    }

    #[test]
    fn test_invalid_id_returns_406() {
        let err = BurrowError::InvalidId {
            value: "x".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_unknown_field_returns_406() {
        let err = BurrowError::UnknownField {
            resource: "book".to_string(),
            field: "Colour".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_reference_configuration_errors_return_406() {
        let invalid = BurrowError::InvalidReference {
            resource: "book".to_string(),
            field: "LibraryId".to_string(),
        };
        let unknown = BurrowError::UnknownResource {
            name: "library".to_string(),
        };
        assert_eq!(invalid.status_code(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(unknown.status_code(), StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_marshal_failure_returns_500() {
        let err = BurrowError::Marshal {
            resource: "book".to_string(),
            message: "key must be a string".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            BurrowError::NotAllowed {
                resource: "book".to_string(),
                operation: Operation::List,
            }
            .error_code(),
            "NOT_ALLOWED"
        );
        assert_eq!(
            BurrowError::InvalidBody {
                message: "EOF".to_string()
            }
            .error_code(),
            "INVALID_BODY"
        );
        assert_eq!(
            BurrowError::UnknownResource {
                name: "shelf".to_string()
            }
            .error_code(),
            "UNKNOWN_RESOURCE"
        );
    }
}

// =============================================================================
// Error Matching Tests
// =============================================================================

mod error_matching_tests {
    use super::*;

    fn read(id: i64) -> Result<(), BurrowError> {
        Err(BurrowError::api(
            StatusCode::NOT_FOUND,
            format!("Could not find book with id: {}", id),
        ))
    }

    #[test]
    fn test_can_match_accessor_errors() {
        match read(3) {
            Err(BurrowError::Api { status, message }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "Could not find book with id: 3");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_can_match_config_errors() {
        let shape = RecordShape::new("book").identifier("Id").identifier("Isbn");
        match shape.validate() {
            Err(ConfigError::DuplicateIdentifier { first, second, .. }) => {
                assert_eq!(first, "Id");
                assert_eq!(second, "Isbn");
            }
            other => panic!("Expected DuplicateIdentifier, got {:?}", other),
        }
    }
}

// =============================================================================
// IntoResponse Tests
// =============================================================================

mod into_response_tests {
    use super::*;

    #[tokio::test]
    async fn test_accessor_error_into_response() {
        let response =
            BurrowError::api(StatusCode::NOT_FOUND, "Could not find book with id: 3").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Could not find book with id: 3\n");
    }

    #[tokio::test]
    async fn test_not_allowed_into_response() {
        let response = BurrowError::NotAllowed {
            resource: "library".to_string(),
            operation: Operation::Delete,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Deleting library is not allowed\n");
    }
}
