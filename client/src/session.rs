//! Authenticated session
//!
//! A session is created by sign-in or sign-up and passed by reference to
//! every authenticated call. Logging out means dropping it.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};

/// How long a token is trusted after sign-in
pub fn default_ttl() -> Duration {
    Duration::minutes(15)
}

/// Signed-in user and bearer token
#[derive(Debug, Clone)]
pub struct Session {
    email: String,
    token: SecretString,
    expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(email: impl Into<String>, token: SecretString, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            token,
            expires_at: now + ttl,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Expired once `now` reaches the expiry instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub(crate) fn bearer_token(&self) -> &str {
        self.token.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_at(now: DateTime<Utc>) -> Session {
        Session::new("ana@vitaprev.app", SecretString::new("tok-123".to_string()), default_ttl(), now)
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let session = session_at(now);
        assert!(!session.is_expired_at(now));
        assert!(!session.is_expired_at(now + Duration::minutes(14)));
        assert!(session.is_expired_at(now + Duration::minutes(15)));
    }

    #[test]
    fn test_debug_hides_token() {
        let session = session_at(Utc::now());
        let debug = format!("{:?}", session);
        assert!(!debug.contains("tok-123"));
        assert_eq!(session.bearer_token(), "tok-123");
    }
}
