//! One-time admin bootstrap codes.
//!
//! When the CRM starts without any admin profile, a random code is issued and a login
//! link carrying it is logged. The first login presenting the code before it expires
//! is promoted to admin; the code is consumed on success and dropped on expiry.

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Lifetime of a freshly issued code.
pub const ADMIN_CODE_TTL: Duration = Duration::from_secs(60);

const CODE_LENGTH: usize = 32;
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Clone)]
struct IssuedCode {
    code: String,
    expires_at: Instant,
}

/// Holds at most one pending admin code, shared across request handlers.
#[derive(Clone)]
pub struct AdminCodeService {
    ttl: Duration,
    pending: Arc<RwLock<Option<IssuedCode>>>,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(ADMIN_CODE_TTL)
    }

    /// Creates a service whose codes live for `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: Arc::new(RwLock::new(None)),
        }
    }

    /// Issues a new 32-character alphanumeric code, replacing any pending one.
    pub async fn issue(&self) -> String {
        let mut rng = rand::rng();
        let code: String = (0..CODE_LENGTH)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect();

        *self.pending.write().await = Some(IssuedCode {
            code: code.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        code
    }

    /// Consumes the pending code if `input` matches it and it has not expired.
    ///
    /// A wrong guess leaves the pending code in place; an expired code is dropped.
    ///
    /// # Returns
    /// - `true` - Code accepted and consumed
    /// - `false` - No pending code, mismatch, or expired
    pub async fn redeem(&self, input: &str) -> bool {
        let mut pending = self.pending.write().await;

        let Some(issued) = pending.as_ref() else {
            return false;
        };

        if Instant::now() >= issued.expires_at {
            *pending = None;
            return false;
        }

        if issued.code != input {
            return false;
        }

        *pending = None;
        true
    }

    /// Whether an unexpired code is waiting to be redeemed.
    pub async fn is_pending(&self) -> bool {
        self.pending
            .read()
            .await
            .as_ref()
            .is_some_and(|issued| Instant::now() < issued.expires_at)
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}

/// Login URL that carries an admin code through the OAuth flow.
pub fn admin_login_link(app_url: &str, code: &str) -> String {
    format!(
        "{}/api/v1/auth/login?admin_code={}",
        app_url.trim_end_matches('/'),
        code
    )
}
