use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::email_templates::waitlist_confirm_email;
use crate::domain::entities::waitlist_entry::{Provider, WaitlistEntry, WaitlistStatus};

/// Launch throughput assumed by the estimated-access projection:
/// 100 entries granted access per 7-day period.
const ENTRIES_PER_WEEK: i64 = 100;

// ============================================================================
// Repository Traits
// ============================================================================

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    /// Insert a new entry. The store enforces uniqueness of `email` and
    /// `external_user_id`; a violation surfaces as
    /// [`AppError::DuplicateEntry`], so concurrent submissions cannot
    /// slip past a pre-insert check.
    async fn insert(&self, new: NewWaitlistEntry) -> AppResult<WaitlistEntry>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>>;
    async fn find_by_external_user_id(
        &self,
        external_user_id: &str,
    ) -> AppResult<Option<WaitlistEntry>>;
    /// Point lookup by lookup token, joined with the entry's 1-based rank
    /// in insertion order and the total entry count.
    async fn find_ranked(&self, lookup_token: Uuid) -> AppResult<Option<RankedEntry>>;
    async fn count(&self) -> AppResult<i64>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()>;
}

// ============================================================================
// Data carried across the boundary
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewWaitlistEntry {
    pub id: Uuid,
    pub email: String,
    pub external_user_id: Option<String>,
    pub provider: Provider,
    pub status: WaitlistStatus,
    pub source: Option<String>,
    pub lookup_token: Uuid,
}

#[derive(Debug, Clone)]
pub struct RankedEntry {
    pub entry: WaitlistEntry,
    pub position: i64,
    pub total: i64,
}

/// Everything the public status page shows.
#[derive(Debug, Clone)]
pub struct WaitlistPosition {
    pub position: i64,
    pub people_ahead: i64,
    pub total_people: i64,
    pub status: WaitlistStatus,
    pub email: String,
    pub joined_at: DateTime<Utc>,
    pub estimated_timeline: String,
}

/// A verified identity handed over by the external auth provider.
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    /// Compound token in the form `<issuer>|<subject>`.
    pub token_identifier: String,
    pub email: String,
}

impl AuthIdentity {
    /// Stable dedup key: the subject portion after the `|` separator.
    /// The issuer portion is never interpreted.
    pub fn external_user_id(&self) -> Option<&str> {
        self.token_identifier
            .split_once('|')
            .map(|(_, subject)| subject)
            .filter(|subject| !subject.is_empty())
    }
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    email: Arc<dyn EmailSender>,
    app_origin: String,
}

impl WaitlistUseCases {
    pub fn new(repo: Arc<dyn WaitlistRepo>, email: Arc<dyn EmailSender>, app_origin: String) -> Self {
        Self {
            repo,
            email,
            app_origin,
        }
    }

    /// Register a direct email submission. The entry stays `pending`
    /// because nothing verified the address.
    #[instrument(skip(self))]
    pub async fn join_by_email(
        &self,
        email: &str,
        source: Option<&str>,
    ) -> AppResult<WaitlistEntry> {
        let normalized = normalize_email(email);

        let entry = self
            .repo
            .insert(NewWaitlistEntry {
                id: Uuid::new_v4(),
                email: normalized,
                external_user_id: None,
                provider: Provider::Email,
                status: WaitlistStatus::Pending,
                source: source.map(|s| s.to_string()),
                lookup_token: Uuid::new_v4(),
            })
            .await?;

        self.dispatch_confirmation(&entry);
        Ok(entry)
    }

    /// Register the authenticated caller. The entry is `confirmed` up
    /// front since the auth provider already verified the identity.
    #[instrument(skip(self, identity))]
    pub async fn join_authenticated(
        &self,
        identity: Option<AuthIdentity>,
        source: Option<&str>,
    ) -> AppResult<WaitlistEntry> {
        let identity = identity.ok_or(AppError::Unauthenticated)?;
        // A compound token without a subject is a malformed identity.
        let external_user_id = identity
            .external_user_id()
            .ok_or(AppError::Unauthenticated)?
            .to_string();

        let entry = self
            .repo
            .insert(NewWaitlistEntry {
                id: Uuid::new_v4(),
                email: normalize_email(&identity.email),
                external_user_id: Some(external_user_id),
                provider: Provider::Oauth,
                status: WaitlistStatus::Confirmed,
                source: source.map(|s| s.to_string()),
                lookup_token: Uuid::new_v4(),
            })
            .await?;

        self.dispatch_confirmation(&entry);
        Ok(entry)
    }

    /// "Already joined?" lookup driving idempotent UI state. Resolves by
    /// email when given, otherwise by the authenticated caller's derived
    /// external user id.
    #[instrument(skip(self, identity))]
    pub async fn status_for(
        &self,
        email: Option<&str>,
        identity: Option<&AuthIdentity>,
    ) -> AppResult<Option<WaitlistEntry>> {
        if let Some(email) = email {
            return self.repo.find_by_email(&normalize_email(email)).await;
        }

        match identity.and_then(|id| id.external_user_id()) {
            Some(external_user_id) => self.repo.find_by_external_user_id(external_user_id).await,
            None => Ok(None),
        }
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repo.count().await
    }

    /// Answer "where do I stand" for a lookup-token holder. Unknown
    /// tokens are an absence, not an error.
    #[instrument(skip(self))]
    pub async fn position(&self, lookup_token: Uuid) -> AppResult<Option<WaitlistPosition>> {
        let Some(ranked) = self.repo.find_ranked(lookup_token).await? else {
            return Ok(None);
        };

        Ok(Some(WaitlistPosition {
            position: ranked.position,
            people_ahead: ranked.position - 1,
            total_people: ranked.total,
            status: ranked.entry.status,
            email: ranked.entry.email,
            joined_at: ranked.entry.joined_at,
            estimated_timeline: estimated_timeline(ranked.position, Utc::now()),
        }))
    }

    /// Fire-and-forget confirmation dispatch. Enrollment already
    /// succeeded; a flaky email service must not make it look failed, so
    /// delivery errors are logged and dropped. Single attempt, no retry.
    fn dispatch_confirmation(&self, entry: &WaitlistEntry) {
        let (subject, html) = waitlist_confirm_email(&self.app_origin, entry.lookup_token);
        let email = self.email.clone();
        let to = entry.email.clone();
        tokio::spawn(async move {
            if let Err(err) = email.send(&to, &subject, &html).await {
                tracing::error!(error = ?err, to = %to, "waitlist confirmation email failed");
            }
        });
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Coarse access-date projection: `ceil(position / 100)` weeks from now,
/// rendered as a month name, with the year appended only when it differs
/// from the current one.
fn estimated_timeline(position: i64, now: DateTime<Utc>) -> String {
    let weeks = (position.max(1) + ENTRIES_PER_WEEK - 1) / ENTRIES_PER_WEEK;
    let target = now + chrono::Duration::days(weeks * 7);
    if target.year() == now.year() {
        target.format("%B").to_string()
    } else {
        target.format("%B %Y").to_string()
    }
}
