use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::{ErrorMessage, HttpError},
    utils::token,
    AppState,
};

#[derive(Debug, Clone)]
pub struct AdminSession {
    pub subject: String,
}

fn extract_token(cookie_jar: &CookieJar, req: &Request) -> Option<String> {
    cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| {
                    auth_value
                        .strip_prefix("Bearer ")
                        .map(|token| token.to_owned())
                })
        })
}

/// Admin gate: the opaque token from the `token` cookie (or a bearer
/// header) must verify and carry the configured admin identity.
pub async fn auth(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let token = extract_token(&cookie_jar, &req)
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::TokenNotProvided))?;

    let subject = token::decode_token(token, app_state.env.jwt_secret.as_bytes())?;

    if subject != app_state.env.admin_email {
        return Err(HttpError::new(
            ErrorMessage::PermissionDenied,
            StatusCode::FORBIDDEN,
        ));
    }

    req.extensions_mut().insert(AdminSession { subject });

    Ok(next.run(req).await)
}

/// Same gate, enforced only for mutating methods. The property routes
/// serve the public site on GET and the admin editor on POST/PUT/DELETE.
pub async fn admin_guard(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    if matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        return Ok(next.run(req).await);
    }

    auth(cookie_jar, Extension(app_state), req, next).await
}
