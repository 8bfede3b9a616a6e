use crate::common::auth::Caller;
use crate::common::{Capability, UserId};
use crate::domains::auth::JwtService;
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Authenticated user information from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub is_admin: bool,
    pub scopes: Vec<Capability>,
}

impl AuthUser {
    /// The explicit caller context handed to engine operations.
    pub fn caller(&self) -> Caller {
        Caller::new(self.user_id, self.is_admin, self.scopes.clone())
    }
}

/// Bearer-token authentication middleware
///
/// Extracts the token from the Authorization header, verifies it, and adds
/// AuthUser to request extensions. If no token or invalid token, the request
/// continues without AuthUser (public access); handlers that require auth
/// reject the missing extension themselves.
pub async fn auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(
            "Authenticated user: {} (admin: {})",
            user.user_id, user.is_admin
        );
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify the bearer token from a request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    // Get Authorization header
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    // Verify token
    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        user_id: UserId::from_i64(claims.user_id),
        is_admin: claims.is_admin,
        scopes: claims.scopes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let token = jwt_service
            .create_token(7, false, vec![Capability::OfficeCreate])
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.user_id, UserId::from_i64(7));
        assert!(auth_user.caller().has_scope(Capability::OfficeCreate));
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let token = jwt_service.create_token(9, true, vec![]).unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_some());
        assert_eq!(auth_user.unwrap().user_id, UserId::from_i64(9));
    }

    #[test]
    fn test_no_auth_header() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_none());
    }

    #[test]
    fn test_invalid_token() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer invalid_token")
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_none());
    }
}
