use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::WaitlistEntry,
    use_cases::waitlist::{NewWaitlistEntry, RankedEntry, WaitlistRepo},
};

fn row_to_entry(row: &sqlx::postgres::PgRow) -> AppResult<WaitlistEntry> {
    let provider: String = row.get("provider");
    let status: String = row.get("status");
    Ok(WaitlistEntry {
        id: row.get("id"),
        seq: row.get("seq"),
        email: row.get("email"),
        external_user_id: row.get("external_user_id"),
        provider: provider
            .parse()
            .map_err(|_| AppError::Database(format!("unknown provider value: {provider}")))?,
        status: status
            .parse()
            .map_err(|_| AppError::Database(format!("unknown status value: {status}")))?,
        joined_at: row.get("joined_at"),
        source: row.get("source"),
        lookup_token: row.get("lookup_token"),
    })
}

/// Turn a unique-constraint violation into the duplicate-enrollment
/// rejection the caller expects. Which index tripped tells us whether the
/// email or the external user id was already registered.
fn map_insert_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return match db_err.constraint() {
            Some("waitlist_entries_external_user_id_key") => {
                AppError::DuplicateEntry("User already on waitlist".into())
            }
            _ => AppError::DuplicateEntry("Email already registered for waitlist".into()),
        };
    }
    AppError::from(err)
}

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn insert(&self, new: NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        let row = sqlx::query(
            r#"
                INSERT INTO waitlist_entries (id, email, external_user_id, provider, status, source, lookup_token)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, seq, email, external_user_id, provider, status, joined_at, source, lookup_token
            "#,
        )
        .bind(new.id)
        .bind(&new.email)
        .bind(&new.external_user_id)
        .bind(new.provider.to_string())
        .bind(new.status.to_string())
        .bind(&new.source)
        .bind(new.lookup_token)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;
        row_to_entry(&row)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        let row = sqlx::query(
            "SELECT id, seq, email, external_user_id, provider, status, joined_at, source, lookup_token
             FROM waitlist_entries WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        row.as_ref().map(row_to_entry).transpose()
    }

    async fn find_by_external_user_id(
        &self,
        external_user_id: &str,
    ) -> AppResult<Option<WaitlistEntry>> {
        let row = sqlx::query(
            "SELECT id, seq, email, external_user_id, provider, status, joined_at, source, lookup_token
             FROM waitlist_entries WHERE external_user_id = $1",
        )
        .bind(external_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        row.as_ref().map(row_to_entry).transpose()
    }

    async fn find_ranked(&self, lookup_token: Uuid) -> AppResult<Option<RankedEntry>> {
        // seq is assigned in commit order, so rank-by-seq agrees with
        // rank-by-joined_at and is stable under equal timestamps.
        let row = sqlx::query(
            r#"
                SELECT w.id, w.seq, w.email, w.external_user_id, w.provider, w.status,
                       w.joined_at, w.source, w.lookup_token,
                       (SELECT COUNT(*) FROM waitlist_entries r WHERE r.seq <= w.seq) AS position,
                       (SELECT COUNT(*) FROM waitlist_entries) AS total
                FROM waitlist_entries w
                WHERE w.lookup_token = $1
            "#,
        )
        .bind(lookup_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        row.map(|row| {
            Ok(RankedEntry {
                entry: row_to_entry(&row)?,
                position: row.get("position"),
                total: row.get("total"),
            })
        })
        .transpose()
    }

    async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM waitlist_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(row.get("total"))
    }
}
