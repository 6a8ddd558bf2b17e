use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;

use crate::{
    adapters::http::app_state::AppState, application::jwt, use_cases::waitlist::AuthIdentity,
};

/// Pull a verified identity out of the access-token cookie or bearer
/// header. Absent or invalid tokens yield `None`; callers decide whether
/// that is an error.
pub fn current_identity(
    jar: &CookieJar,
    headers: &HeaderMap,
    app_state: &AppState,
) -> Option<AuthIdentity> {
    let token = jar
        .get("access_token")
        .map(|c| c.value().to_string())
        .or_else(|| {
            headers
                .get(axum::http::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|v| v.to_string())
        })?;

    let claims = jwt::verify(&token, &app_state.config.jwt_secret).ok()?;
    Some(AuthIdentity {
        token_identifier: claims.sub,
        email: claims.email,
    })
}
