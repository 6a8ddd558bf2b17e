use std::sync::Arc;

use crate::{
    application::use_cases::{stacks::StacksUseCases, waitlist::WaitlistUseCases},
    infra::{config::AppConfig, rate_limit::RateLimiterTrait},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub waitlist_use_cases: Arc<WaitlistUseCases>,
    pub stacks_use_cases: Arc<StacksUseCases>,
    pub rate_limiter: Arc<dyn RateLimiterTrait>,
}
