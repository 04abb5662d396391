use std::fmt;

/// Phemex REST endpoint environments.
///
/// VIP accounts get a dedicated host with higher rate limits; everyone else
/// uses the public host. The testnet host serves paper accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `https://vapi.phemex.com`
    Vip,
    /// `https://api.phemex.com`
    Public,
    /// `https://testnet-api.phemex.com`
    Testnet,
}

impl Endpoint {
    /// Base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Endpoint::Vip => "https://vapi.phemex.com",
            Endpoint::Public => "https://api.phemex.com",
            Endpoint::Testnet => "https://testnet-api.phemex.com",
        }
    }
}

/// API credentials used to sign every request.
#[derive(Clone)]
pub struct Credentials {
    /// Access token sent in the `x-phemex-access-token` header
    pub api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create credentials from an API key/secret pair.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Raw secret bytes for HMAC signing.
    pub(crate) fn secret(&self) -> &[u8] {
        self.api_secret.as_bytes()
    }
}

// The secret must never leak through debug output or logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
