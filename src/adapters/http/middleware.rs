use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    adapters::http::{app_state::AppState, auth},
    app_error::AppError,
};

/// Every request counts against the client IP. Requests carrying a valid
/// access token additionally count against that caller, so one
/// authenticated user cannot burn a shared NAT's whole IP budget.
pub async fn rate_limit_middleware(
    State(app_state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(app_state.config.trust_proxy, &addr, request.headers());
    let caller = caller_key(&jar, request.headers(), &app_state);

    tracing::debug!(
        trust_proxy = app_state.config.trust_proxy,
        connect_ip = %addr.ip(),
        using_ip = %ip,
        caller = ?caller,
        "Rate limiting request"
    );

    app_state.rate_limiter.check(&ip, caller.as_deref()).await?;

    Ok(next.run(request).await)
}

/// Secondary limit key: the verified caller's email, normalized. Derived
/// from the access token so a spoofed cookie cannot pin the limit on
/// someone else.
fn caller_key(jar: &CookieJar, headers: &HeaderMap, app_state: &AppState) -> Option<String> {
    auth::current_identity(jar, headers, app_state).map(|identity| identity.email.to_lowercase())
}

fn client_ip(trust_proxy: bool, addr: &SocketAddr, headers: &HeaderMap) -> String {
    // Forwarded headers are spoofable; honor them only behind a trusted proxy.
    if trust_proxy
        && let Some(ip) = forwarded_ip(headers)
    {
        return ip;
    }
    addr.ip().to_string()
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return Some(ip.to_string());
    }
    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
