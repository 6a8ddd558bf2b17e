//! In-memory mock implementations for repository and outbound traits.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::{
        stacks::CatalogRepo,
        waitlist::{EmailSender, NewWaitlistEntry, RankedEntry, WaitlistRepo},
    },
    domain::entities::{
        catalog::{Creator, Product, Stack},
        waitlist_entry::WaitlistEntry,
    },
    infra::rate_limit::RateLimiterTrait,
};

// ============================================================================
// InMemoryWaitlistRepo
// ============================================================================

/// In-memory waitlist store. Mirrors the Postgres adapter's behavior:
/// uniqueness enforced at insert time, rank derived from the insertion
/// counter.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    entries: Mutex<Vec<WaitlistEntry>>,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn insert(&self, new: NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        let mut entries = self.entries.lock().unwrap();

        if entries.iter().any(|e| e.email == new.email) {
            return Err(AppError::DuplicateEntry(
                "Email already registered for waitlist".into(),
            ));
        }
        if let Some(external_user_id) = &new.external_user_id
            && entries
                .iter()
                .any(|e| e.external_user_id.as_ref() == Some(external_user_id))
        {
            return Err(AppError::DuplicateEntry("User already on waitlist".into()));
        }

        let entry = WaitlistEntry {
            id: new.id,
            seq: entries.len() as i64 + 1,
            email: new.email,
            external_user_id: new.external_user_id,
            provider: new.provider,
            status: new.status,
            joined_at: chrono::Utc::now(),
            source: new.source,
            lookup_token: new.lookup_token,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn find_by_external_user_id(
        &self,
        external_user_id: &str,
    ) -> AppResult<Option<WaitlistEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.external_user_id.as_deref() == Some(external_user_id))
            .cloned())
    }

    async fn find_ranked(&self, lookup_token: Uuid) -> AppResult<Option<RankedEntry>> {
        let entries = self.entries.lock().unwrap();
        let Some(entry) = entries.iter().find(|e| e.lookup_token == lookup_token) else {
            return Ok(None);
        };
        let position = entries.iter().filter(|e| e.seq <= entry.seq).count() as i64;
        Ok(Some(RankedEntry {
            entry: entry.clone(),
            position,
            total: entries.len() as i64,
        }))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.entries.lock().unwrap().len() as i64)
    }
}

// ============================================================================
// Email senders
// ============================================================================

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Records every send so tests can assert on delivered mail.
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

/// Always fails, for verifying that delivery errors stay contained.
pub struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send(&self, _to: &str, _subject: &str, _html: &str) -> AppResult<()> {
        Err(AppError::Internal("email service unavailable".into()))
    }
}

// ============================================================================
// InMemoryCatalogRepo
// ============================================================================

#[derive(Default)]
pub struct InMemoryCatalogRepo {
    creators: Vec<Creator>,
    products: Vec<Product>,
    stacks: Vec<Stack>,
}

impl InMemoryCatalogRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_creator(mut self, creator: Creator) -> Self {
        self.creators.push(creator);
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    pub fn with_stack(mut self, stack: Stack) -> Self {
        self.stacks.push(stack);
        self
    }
}

#[async_trait]
impl CatalogRepo for InMemoryCatalogRepo {
    async fn list_published_stacks(&self) -> AppResult<Vec<Stack>> {
        Ok(self.stacks.iter().filter(|s| s.published).cloned().collect())
    }

    async fn get_stack_by_slug(&self, slug: &str) -> AppResult<Option<Stack>> {
        Ok(self.stacks.iter().find(|s| s.slug == slug).cloned())
    }

    async fn get_creator(&self, id: Uuid) -> AppResult<Option<Creator>> {
        Ok(self.creators.iter().find(|c| c.id == id).cloned())
    }

    async fn get_products_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

// ============================================================================
// InMemoryRateLimiter
// ============================================================================

/// Never limits; route tests are not about throttling.
#[derive(Default)]
pub struct InMemoryRateLimiter;

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn check(&self, _ip: &str, _caller: Option<&str>) -> AppResult<()> {
        Ok(())
    }
}
