use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, auth},
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::{Provider, WaitlistEntry, WaitlistStatus},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(join))
        .route("/authenticated", post(join_authenticated))
        .route("/status", get(status))
        .route("/count", get(count))
        .route("/{lookup_token}", get(position))
}

// ============================================================================
// Enrollment
// ============================================================================

#[derive(Deserialize)]
struct JoinRequest {
    email: String,
    source: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinResponse {
    id: Uuid,
    lookup_token: Uuid,
}

async fn join(
    State(app_state): State<AppState>,
    Json(body): Json<JoinRequest>,
) -> AppResult<impl IntoResponse> {
    let entry = app_state
        .waitlist_use_cases
        .join_by_email(&body.email, body.source.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(JoinResponse {
            id: entry.id,
            lookup_token: entry.lookup_token,
        }),
    ))
}

#[derive(Deserialize, Default)]
struct JoinAuthenticatedRequest {
    source: Option<String>,
}

async fn join_authenticated(
    State(app_state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    body: Option<Json<JoinAuthenticatedRequest>>,
) -> AppResult<impl IntoResponse> {
    let identity = auth::current_identity(&jar, &headers, &app_state);
    let Json(body) = body.unwrap_or_default();

    let entry = app_state
        .waitlist_use_cases
        .join_authenticated(identity, body.source.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(JoinResponse {
            id: entry.id,
            lookup_token: entry.lookup_token,
        }),
    ))
}

// ============================================================================
// Status / count
// ============================================================================

/// What the "already joined?" lookup exposes. The lookup token stays out
/// of this view: knowing an email must not hand over the status-page
/// credential.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryView {
    email: String,
    provider: Provider,
    status: WaitlistStatus,
    joined_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl From<WaitlistEntry> for EntryView {
    fn from(entry: WaitlistEntry) -> Self {
        EntryView {
            email: entry.email,
            provider: entry.provider,
            status: entry.status,
            joined_at: entry.joined_at,
            source: entry.source,
        }
    }
}

#[derive(Deserialize)]
struct StatusQuery {
    email: Option<String>,
}

#[derive(Serialize)]
struct StatusResponse {
    entry: Option<EntryView>,
}

async fn status(
    State(app_state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> AppResult<impl IntoResponse> {
    let identity = auth::current_identity(&jar, &headers, &app_state);

    let entry = app_state
        .waitlist_use_cases
        .status_for(query.email.as_deref(), identity.as_ref())
        .await?;

    Ok(Json(StatusResponse {
        entry: entry.map(EntryView::from),
    }))
}

#[derive(Serialize)]
struct CountResponse {
    count: i64,
}

async fn count(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let count = app_state.waitlist_use_cases.count().await?;
    Ok(Json(CountResponse { count }))
}

// ============================================================================
// Position (public status page)
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PositionResponse {
    position: i64,
    people_ahead: i64,
    total_people: i64,
    status: WaitlistStatus,
    email: String,
    joined_at: DateTime<Utc>,
    estimated_timeline: String,
}

async fn position(
    State(app_state): State<AppState>,
    Path(lookup_token): Path<String>,
) -> AppResult<impl IntoResponse> {
    // A token that isn't even a UUID can't be on file; same outcome as unknown.
    let lookup_token = Uuid::parse_str(&lookup_token).map_err(|_| AppError::NotFound)?;

    let pos = app_state
        .waitlist_use_cases
        .position(lookup_token)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(PositionResponse {
        position: pos.position,
        people_ahead: pos.people_ahead,
        total_people: pos.total_people,
        status: pos.status,
        email: pos.email,
        joined_at: pos.joined_at,
        estimated_timeline: pos.estimated_timeline,
    }))
}
