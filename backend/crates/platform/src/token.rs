//! Signed Bearer Tokens
//!
//! Self-contained, time-bounded tokens asserting an authenticated
//! identity, verified without any server-side lookup.
//!
//! Wire format: `base64url(claims JSON) . base64url(HMAC-SHA256)`.
//! Claims carry {sub, iat, exp}; the signing secret is injected at
//! construction and never read from ambient state. There is no
//! revocation: a token stays valid until its expiry instant, and a
//! compromised secret invalidates every outstanding token at once.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Token verification errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Structure or claims could not be decoded
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match the payload
    #[error("Invalid token signature")]
    BadSignature,

    /// The token's expiry instant has passed
    #[error("Token has expired")]
    Expired,
}

/// Signed claims embedded in a token
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject (the authenticated identity)
    sub: String,
    /// Issued-at, unix seconds
    iat: i64,
    /// Expiry, unix seconds
    exp: i64,
}

/// Issues and verifies signed bearer tokens.
///
/// Holds the process-wide signing secret as explicit immutable state so
/// the component stays testable with injected keys.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: [u8; 32],
    ttl: Duration,
}

impl TokenIssuer {
    /// Token lifetime: 24 hours.
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    pub fn new(secret: [u8; 32]) -> Self {
        Self {
            secret,
            ttl: Duration::hours(Self::DEFAULT_TTL_HOURS),
        }
    }

    /// Create an issuer with a random secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut secret);
        Self::new(secret)
    }

    /// Issue a token for `subject`, expiring [`Self::DEFAULT_TTL_HOURS`]
    /// from now.
    pub fn issue(&self, subject: &str) -> String {
        self.issue_at(subject, Utc::now())
    }

    fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> String {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        // Claims are a fixed struct; serialization cannot fail.
        let payload = serde_json::to_vec(&claims).unwrap_or_default();
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

        let signature_b64 = URL_SAFE_NO_PAD.encode(self.sign(payload_b64.as_bytes()));

        format!("{}.{}", payload_b64, signature_b64)
    }

    /// Verify a token and return its subject.
    ///
    /// The signature is checked before the claims are inspected, so a
    /// forged payload never influences the outcome. Comparison inside
    /// `Mac::verify_slice` is constant-time.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let (payload_b64, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims.sub)
    }

    fn sign(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"[SECRET]")
            .field("ttl", &self.ttl)
            .finish()
    }
}
