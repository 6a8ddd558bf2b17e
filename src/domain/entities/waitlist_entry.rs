use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};
use uuid::Uuid;

/// How the person got onto the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Provider {
    /// Direct email submission from the landing page form.
    Email,
    /// Social sign-in through the external auth provider.
    Oauth,
}

/// `Pending` entries came in without identity verification; `Confirmed`
/// entries were created through an authenticated sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WaitlistStatus {
    Pending,
    Confirmed,
}

/// One record per interested person. Created exactly once, never updated
/// or deleted in normal operation.
#[derive(Debug, Clone)]
pub struct WaitlistEntry {
    pub id: Uuid,
    /// Monotonic insertion-order counter assigned by the store. Ranking
    /// reads it directly instead of re-sorting the whole table.
    pub seq: i64,
    /// Lower-cased at write time; globally unique.
    pub email: String,
    /// Subject portion of the auth provider's compound token identifier.
    /// Present only for entries created via authenticated sign-in.
    pub external_user_id: Option<String>,
    pub provider: Provider,
    pub status: WaitlistStatus,
    pub joined_at: DateTime<Utc>,
    /// Free-text attribution tag (which page/button triggered signup).
    pub source: Option<String>,
    /// Sole credential for the public status page. Unguessable, so a
    /// third party cannot probe enrollment by email.
    pub lookup_token: Uuid,
}
