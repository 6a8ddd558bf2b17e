use sqlx::PgPool;

use crate::app_error::AppError;

pub mod catalog;
pub mod waitlist;

const MAX_JSON_LOG_LEN: usize = 200;

/// Parse a JSONB value to the target type, logging a warning on failure.
///
/// SQL NULL is a valid empty state and returns the default silently; only
/// actual parse failures (type mismatches, corruption) are logged. One
/// corrupt row must not poison a whole listing.
pub fn parse_json_with_fallback<T: serde::de::DeserializeOwned + Default>(
    json: &serde_json::Value,
    field_name: &str,
    entity_type: &str,
    entity_id: &str,
) -> T {
    if json.is_null() {
        return T::default();
    }

    serde_json::from_value(json.clone()).unwrap_or_else(|err| {
        // Truncate raw JSON to prevent log bloat from large arrays
        let truncated = truncate_for_log(&json.to_string());

        tracing::warn!(
            field = field_name,
            entity_type = entity_type,
            entity_id = entity_id,
            raw_json = %truncated,
            error = %err,
            "Failed to parse JSON field, using default value"
        );
        T::default()
    })
}

/// Cut at the last char boundary at or below the limit; byte-indexing the
/// serialized JSON would panic when the cutoff lands inside a multibyte
/// character.
fn truncate_for_log(raw: &str) -> String {
    if raw.len() <= MAX_JSON_LOG_LEN {
        return raw.to_string();
    }
    let mut end = MAX_JSON_LOG_LEN;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &raw[..end])
}

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    AppError::DuplicateEntry("A record with this value already exists".into())
                } else if db_err.is_foreign_key_violation() {
                    AppError::InvalidInput("Referenced record not found".into())
                } else {
                    // Log the actual error for debugging, but don't expose details
                    tracing::error!(error = ?err, "Database error");
                    AppError::Database("Database operation failed".into())
                }
            }
            _ => {
                tracing::error!(error = ?err, "Database error");
                AppError::Database("Database operation failed".into())
            }
        }
    }
}
