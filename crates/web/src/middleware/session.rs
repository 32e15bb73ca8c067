use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use storage::models::{Role, Session};
use uuid::Uuid;

use crate::error::WebError;

pub const CALLER_ID_HEADER: &str = "x-caller-id";
pub const CALLER_ROLE_HEADER: &str = "x-caller-role";

/// Explicit caller session built from the identity gateway's headers.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let user_id = header(CALLER_ID_HEADER)
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or(WebError::Unauthorized)?;
        let role = header(CALLER_ROLE_HEADER)
            .and_then(|value| value.parse::<Role>().ok())
            .ok_or(WebError::Unauthorized)?;

        Ok(Caller(Session::new(user_id, role)))
    }
}
