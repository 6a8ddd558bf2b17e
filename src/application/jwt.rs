use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use secrecy::ExposeSecret;
use time::{Duration, OffsetDateTime};

use crate::app_error::{AppError, AppResult};

/// Access-token claims minted by the external auth provider.
///
/// `sub` carries the provider's compound token identifier in the form
/// `<issuer>|<subject>`; only the subject portion identifies the user
/// stably across sessions.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn issue(
    token_identifier: &str,
    email: &str,
    secret: &secrecy::SecretString,
    ttl: Duration,
) -> AppResult<String> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let exp = now + ttl.whole_seconds();
    let claims = Claims {
        sub: token_identifier.to_string(),
        email: email.to_string(),
        iat: now,
        exp,
    };
    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

pub fn verify(token: &str, secret: &secrecy::SecretString) -> AppResult<Claims> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let secret = SecretString::from("test-secret");
        let token = issue(
            "https://auth.example|user-123",
            "user@example.com",
            &secret,
            Duration::hours(1),
        )
        .unwrap();

        let claims = verify(&token, &secret).unwrap();
        assert_eq!(claims.sub, "https://auth.example|user-123");
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn token_fails_verification_with_wrong_secret() {
        let token = issue(
            "iss|sub",
            "user@example.com",
            &SecretString::from("secret-a"),
            Duration::hours(1),
        )
        .unwrap();

        let err = verify(&token, &SecretString::from("secret-b")).unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[test]
    fn expired_token_is_rejected() {
        let secret = SecretString::from("test-secret");
        let token = issue("iss|sub", "user@example.com", &secret, Duration::hours(-2)).unwrap();

        assert!(verify(&token, &secret).is_err());
    }
}
