use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// HTTP header carrying the authenticated user identity, set by the
/// upstream auth layer. Authentication itself happens outside this
/// service; here the identity is only consumed.
pub const OWNER_HEADER: &str = "x-user-id";

/// Authenticated owner identity scoping all wardrobe data
///
/// Extractor: requests without a resolved owner are rejected before any
/// work happens.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnerId(pub String);

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|owner| !owner.is_empty())
            .map(|owner| OwnerId(owner.to_string()))
            .ok_or(AppError::InvalidOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_extracts_owner_from_header() {
        let (mut parts, _) = Request::builder()
            .header(OWNER_HEADER, "u1")
            .body(())
            .unwrap()
            .into_parts();

        let owner = OwnerId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(owner, OwnerId("u1".to_string()));
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

        let result = OwnerId::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::InvalidOwner)));
    }

    #[tokio::test]
    async fn test_blank_header_is_rejected() {
        let (mut parts, _) = Request::builder()
            .header(OWNER_HEADER, "   ")
            .body(())
            .unwrap()
            .into_parts();

        let result = OwnerId::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::InvalidOwner)));
    }
}
