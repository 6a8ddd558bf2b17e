use crate::{
    adapters::{email::resend::ResendEmailSender, http::app_state::AppState},
    infra::{
        config::AppConfig,
        postgres_persistence,
        rate_limit::{RateLimiterTrait, RedisRateLimiter},
    },
    use_cases::{
        stacks::{CatalogRepo, StacksUseCases},
        waitlist::{EmailSender, WaitlistRepo, WaitlistUseCases},
    },
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);

    let rate_limiter = Arc::new(
        RedisRateLimiter::new(
            &config.redis_url,
            config.rate_limit_window_secs,
            config.rate_limit_per_ip,
            config.rate_limit_per_caller,
        )
        .await?,
    );

    let email = Arc::new(ResendEmailSender::new(
        config.resend_api_key.clone(),
        config.email_from.clone(),
    ));

    let waitlist_use_cases = WaitlistUseCases::new(
        postgres_arc.clone() as Arc<dyn WaitlistRepo>,
        email as Arc<dyn EmailSender>,
        config.app_origin.to_string(),
    );

    let stacks_use_cases = StacksUseCases::new(postgres_arc as Arc<dyn CatalogRepo>);

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
        stacks_use_cases: Arc::new(stacks_use_cases),
        rate_limiter: rate_limiter as Arc<dyn RateLimiterTrait>,
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aistack=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
