//! Offline decoding of the bearer credential's embedded claims.
//!
//! The credential is a three-segment signed token; only the middle segment is
//! read. The signature is never checked here, the API does that. Anything
//! that does not parse is treated as "no credential" rather than an error.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use base64ct::{Base64Unpadded, Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Deserializer, Serialize};

/// Identity of the signed-in user as shown to the UI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

/// Raw claim set carried in the token payload.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Claims {
    #[serde(default, deserialize_with = "subject_id")]
    pub sub: Option<String>,
    /// Legacy subject field still issued by the backend alongside `sub`.
    #[serde(default, deserialize_with = "subject_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry in seconds since the Unix epoch; may be fractional.
    #[serde(default)]
    pub exp: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SubjectId {
    Text(String),
    Number(serde_json::Number),
}

/// Subjects arrive as strings or bare numbers; both become the string id.
fn subject_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<SubjectId>::deserialize(deserializer)?.map(|id| match id {
        SubjectId::Text(text) => text,
        SubjectId::Number(number) => number.to_string(),
    }))
}

impl Claims {
    fn subject(&self) -> Option<&str> {
        self.sub
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.user_id.as_deref().filter(|s| !s.is_empty()))
    }

    /// Identity view of these claims; `None` without a subject.
    pub fn identity(&self) -> Option<UserIdentity> {
        Some(UserIdentity {
            id: self.subject()?.to_owned(),
            email: self.email.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            role: self.role.clone().unwrap_or_default(),
        })
    }
}

/// Parse the payload segment of `token`.
pub fn parse_claims(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return None;
    };
    let bytes = decode_segment(payload)?;
    serde_json::from_slice(&bytes).ok()
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let trimmed = segment.trim_end_matches('=');
    if trimmed.is_empty() {
        return None;
    }
    Base64UrlUnpadded::decode_vec(trimmed)
        .or_else(|_| Base64Unpadded::decode_vec(trimmed))
        .ok()
}

/// Decode the user identity carried by `token`.
pub fn decode(token: &str) -> Option<UserIdentity> {
    parse_claims(token)?.identity()
}

/// True when `token` is malformed, carries no expiry, or expired at `now`.
pub fn is_expired_at(token: Option<&str>, now: i64) -> bool {
    token
        .and_then(parse_claims)
        .and_then(|claims| claims.exp)
        .map_or(true, |exp| {
            #[allow(clippy::cast_precision_loss)]
            let now = now as f64;
            exp <= now
        })
}

/// [`is_expired_at`] against the current wall clock.
pub fn is_expired(token: Option<&str>) -> bool {
    is_expired_at(token, now_secs())
}

/// Current time in whole seconds since the Unix epoch.
pub fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0) as i64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}
