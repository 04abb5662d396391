//! Request signatures for the Phemex REST API.
//!
//! Every authenticated request carries an HMAC-SHA256 signature over
//! `path + query + expiry + body`, hex-encoded, together with the expiry
//! timestamp it was computed for.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Seconds a request signature stays valid for.
pub const REQUEST_EXPIRY_SECS: i64 = 60;

/// Compute the request signature.
///
/// # Arguments
/// * `secret` - API secret bytes
/// * `path` - request path, e.g. `/g-orders`
/// * `query` - query string without the leading `?`, empty if none
/// * `expiry` - unix timestamp (seconds) the signature expires at
/// * `body` - compact JSON body, empty if none
pub fn sign(secret: &[u8], path: &str, query: &str, expiry: i64, body: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(path.as_bytes());
    if !query.is_empty() {
        mac.update(query.as_bytes());
    }
    mac.update(expiry.to_string().as_bytes());
    if !body.is_empty() {
        mac.update(body.as_bytes());
    }
    hex::encode(mac.finalize().into_bytes())
}

/// Expiry timestamp for a signature computed now.
pub fn expiry_timestamp() -> i64 {
    chrono::Utc::now().timestamp() + REQUEST_EXPIRY_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_hex_sha256() {
        let sig = sign(b"secret", "/public/time", "", 1_700_000_000, "");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_is_deterministic() {
        let a = sign(b"secret", "/g-orders", "symbol=BTCUSDT", 1_700_000_000, "");
        let b = sign(b"secret", "/g-orders", "symbol=BTCUSDT", 1_700_000_000, "");
        assert_eq!(a, b);
    }

    #[test]
    fn signature_depends_on_every_part() {
        let base = sign(b"secret", "/g-orders", "symbol=BTCUSDT", 1_700_000_000, "{}");
        assert_ne!(
            base,
            sign(b"other", "/g-orders", "symbol=BTCUSDT", 1_700_000_000, "{}")
        );
        assert_ne!(
            base,
            sign(b"secret", "/g-orders", "symbol=ETHUSDT", 1_700_000_000, "{}")
        );
        assert_ne!(
            base,
            sign(b"secret", "/g-orders", "symbol=BTCUSDT", 1_700_000_001, "{}")
        );
        assert_ne!(
            base,
            sign(b"secret", "/g-orders", "symbol=BTCUSDT", 1_700_000_000, "")
        );
    }

    #[test]
    fn expiry_is_in_the_future() {
        let now = chrono::Utc::now().timestamp();
        let expiry = expiry_timestamp();
        assert!(expiry >= now + REQUEST_EXPIRY_SECS - 1);
        assert!(expiry <= now + REQUEST_EXPIRY_SECS + 1);
    }
}
