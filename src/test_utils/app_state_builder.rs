//! Builder for a minimal `AppState` backed by in-memory mocks, for
//! HTTP-level testing of the routers.

use std::sync::Arc;

use secrecy::SecretString;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::{
        stacks::StacksUseCases,
        waitlist::{EmailSender, WaitlistUseCases},
    },
    domain::entities::catalog::{Creator, Product, Stack},
    infra::config::AppConfig,
    test_utils::{InMemoryCatalogRepo, InMemoryRateLimiter, InMemoryWaitlistRepo, RecordingEmailSender},
};

pub const TEST_APP_ORIGIN: &str = "https://aistack.test";

fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "postgres://unused-in-tests".to_string(),
        redis_url: "redis://unused-in-tests".to_string(),
        jwt_secret: SecretString::from("test-secret"),
        resend_api_key: SecretString::from("re_test"),
        email_from: "hello@aistack.test".to_string(),
        app_origin: TEST_APP_ORIGIN.parse().unwrap(),
        cors_origin: "http://localhost:3000".parse().unwrap(),
        rate_limit_window_secs: 60,
        rate_limit_per_ip: 1000,
        rate_limit_per_caller: 1000,
        trust_proxy: false,
    }
}

pub struct TestAppStateBuilder {
    waitlist_repo: Arc<InMemoryWaitlistRepo>,
    catalog_repo: InMemoryCatalogRepo,
    email_sender: Arc<dyn EmailSender>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            waitlist_repo: Arc::new(InMemoryWaitlistRepo::new()),
            catalog_repo: InMemoryCatalogRepo::new(),
            email_sender: Arc::new(RecordingEmailSender::new()),
        }
    }

    pub fn with_waitlist_repo(mut self, repo: Arc<InMemoryWaitlistRepo>) -> Self {
        self.waitlist_repo = repo;
        self
    }

    pub fn with_email_sender(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.email_sender = sender;
        self
    }

    pub fn with_creator(mut self, creator: Creator) -> Self {
        self.catalog_repo = self.catalog_repo.with_creator(creator);
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.catalog_repo = self.catalog_repo.with_product(product);
        self
    }

    pub fn with_stack(mut self, stack: Stack) -> Self {
        self.catalog_repo = self.catalog_repo.with_stack(stack);
        self
    }

    pub fn build(self) -> AppState {
        let waitlist_use_cases = WaitlistUseCases::new(
            self.waitlist_repo,
            self.email_sender,
            TEST_APP_ORIGIN.to_string(),
        );
        let stacks_use_cases = StacksUseCases::new(Arc::new(self.catalog_repo));

        AppState {
            config: Arc::new(test_config()),
            waitlist_use_cases: Arc::new(waitlist_use_cases),
            stacks_use_cases: Arc::new(stacks_use_cases),
            rate_limiter: Arc::new(InMemoryRateLimiter),
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
