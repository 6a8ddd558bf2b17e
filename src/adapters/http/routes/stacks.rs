use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_published))
        .route("/{slug}", get(get_by_slug))
}

async fn list_published(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stacks = app_state.stacks_use_cases.list_published().await?;
    Ok(Json(stacks))
}

async fn get_by_slug(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let stack = app_state
        .stacks_use_cases
        .get_by_slug(&slug)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(stack))
}
