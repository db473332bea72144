use crate::model::CallerIdentity;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
};

/// Axum extractor for the authenticated caller of a request.
///
/// The caller's username is taken from the X-User-Id header, standing in for
/// the upstream authentication layer. For development and testing, requests
/// without the header resolve to a default user.
#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(username) = extract_header_value(&parts.headers, "x-user-id") {
            Ok(CallerIdentity::new(username))
        } else {
            Ok(CallerIdentity::default_user())
        }
    }
}

/// Extract header value as string
fn extract_header_value(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(|s| s.to_string())
}
