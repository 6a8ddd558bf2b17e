use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use secrecy::SecretString;
use url::Url;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: SecretString,
    pub resend_api_key: SecretString,
    pub email_from: String,
    pub app_origin: Url,
    pub cors_origin: HeaderValue,
    pub rate_limit_window_secs: u64,
    pub rate_limit_per_ip: u64,
    pub rate_limit_per_caller: u64,
    /// Whether to trust X-Forwarded-For headers. Set to true when behind a reverse proxy (Caddy, nginx).
    /// SECURITY: Only enable this when the API is not directly exposed to the internet.
    pub trust_proxy: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = env::var("BIND_ADDR")
            .unwrap_or("127.0.0.1:3001".to_string())
            .parse()
            .expect("BIND_ADDR must be a valid socket address");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let redis_url = env::var("REDIS_URL").unwrap_or("redis://127.0.0.1:6379".to_string());

        let jwt_secret =
            SecretString::from(env::var("JWT_SECRET").expect("JWT_SECRET must be set"));
        let resend_api_key =
            SecretString::from(env::var("RESEND_API_KEY").expect("RESEND_API_KEY must be set"));
        let email_from = env::var("EMAIL_FROM").expect("EMAIL_FROM must be set");

        let app_origin: Url = env::var("APP_ORIGIN")
            .expect("APP_ORIGIN must be set")
            .parse()
            .expect("APP_ORIGIN must be a valid URL");

        let cors_origin: HeaderValue = env::var("CORS_ORIGIN")
            .unwrap_or("http://localhost:3000".to_string())
            .parse()
            .expect("CORS_ORIGIN must be a valid header value");

        let rate_limit_window_secs: u64 = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or("60".to_string())
            .parse()
            .expect("RATE_LIMIT_WINDOW_SECS must be a valid number");

        let rate_limit_per_ip: u64 = env::var("RATE_LIMIT_PER_IP")
            .unwrap_or("60".to_string())
            .parse()
            .expect("RATE_LIMIT_PER_IP must be a valid number");

        let rate_limit_per_caller: u64 = env::var("RATE_LIMIT_PER_CALLER")
            .unwrap_or("30".to_string())
            .parse()
            .expect("RATE_LIMIT_PER_CALLER must be a valid number");

        // Default to false for security - must explicitly enable when behind a trusted proxy
        let trust_proxy: bool = env::var("TRUST_PROXY")
            .unwrap_or("false".to_string())
            .parse()
            .expect("TRUST_PROXY must be true or false");

        Self {
            bind_addr,
            database_url,
            redis_url,
            jwt_secret,
            resend_api_key,
            email_from,
            app_origin,
            cors_origin,
            rate_limit_window_secs,
            rate_limit_per_ip,
            rate_limit_per_caller,
            trust_proxy,
        }
    }
}
