/// Bearer-token authentication for the protected routes
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use countdown_core::AccountId;
use std::sync::Arc;

/// The account a verified token was issued to.
///
/// Inserted into request extensions by [`auth_middleware`]; handlers take it
/// as an extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub AccountId);

impl AuthenticatedUser {
    pub fn account_id(&self) -> AccountId {
        self.0
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Result<&str, ServerError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ServerError::Auth("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| ServerError::Auth("Malformed authorization header".to_string()))?;

    let token = value
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .unwrap_or_default();

    if token.is_empty() {
        return Err(ServerError::Auth("Expected a bearer token".to_string()));
    }
    Ok(token)
}

/// Reject the request with 401 unless it carries a valid access token
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let token = bearer_token(request.headers())?;

    let account_id = auth_service.verify_access_token(token).map_err(|e| {
        tracing::warn!(path = %request.uri().path(), "Rejected token: {}", e);
        ServerError::Auth("Invalid or expired token".to_string())
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser(account_id));

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the route sits behind auth_middleware
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| ServerError::Auth("Not authenticated".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(bearer_token(&headers("bearer abc.def")).unwrap(), "abc.def");

        assert!(bearer_token(&HeaderMap::new()).is_err());
        assert!(bearer_token(&headers("Basic abc")).is_err());
        assert!(bearer_token(&headers("Bearer")).is_err());
        assert!(bearer_token(&headers("Bearer   ")).is_err());
    }
}
