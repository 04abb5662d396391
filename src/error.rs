use std::fmt;

use serde_json::Value;

/// Result type for phemex-rs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for phemex-rs
#[derive(Debug)]
pub enum Error {
    /// HTTP request failed
    Http(reqwest::Error),

    /// JSON serialization/deserialization failed
    Json(serde_json::Error),

    /// Non-success HTTP status returned by the exchange
    Status { status: u16, body: String },

    /// Exchange reported a business error in the response envelope
    Api(ApiError),

    /// Text that is not a valid decimal literal
    InvalidNumber { value: String, message: String },

    /// Bundled product catalog is malformed
    CatalogLoad(serde_json::Error),

    /// A scaled field could not resolve its instrument's scale factor
    ScaleResolution {
        field: &'static str,
        value: String,
        symbol: Option<String>,
        dimension: &'static str,
        available: Vec<String>,
    },

    /// Request-level validation failed
    Validation(String),

    /// Expected field missing from a response envelope
    MissingField(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {}", e),
            Error::Json(e) => write!(f, "JSON error: {}", e),
            Error::Status { status, body } => {
                write!(f, "API request failed (status {}): {}", status, body)
            }
            Error::Api(e) => write!(f, "{}", e),
            Error::InvalidNumber { value, message } => {
                write!(f, "invalid decimal literal {:?}: {}", value, message)
            }
            Error::CatalogLoad(e) => write!(f, "product catalog failed to load: {}", e),
            Error::ScaleResolution {
                field,
                value,
                symbol,
                dimension,
                available,
            } => write!(
                f,
                "cannot scale field {:?} (value {}, dimension {}) without a valid symbol \
                 (symbol: {}, known symbols: [{}])",
                field,
                value,
                dimension,
                symbol.as_deref().unwrap_or("<none>"),
                available.join(", "),
            ),
            Error::Validation(msg) => write!(f, "validation error: {}", msg),
            Error::MissingField(field) => write!(f, "missing response field: {}", field),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::CatalogLoad(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

/// Business error reported by the exchange inside an otherwise successful
/// HTTP response (`code != 0` in the envelope).
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Phemex business error code
    pub code: i64,
    /// Message text from the envelope, often a `TE_*` constant
    pub msg: String,
    /// Classified error kind for matching without memorizing codes
    pub kind: ApiErrorKind,
    /// The `data` payload of the envelope, if any
    pub data: Option<Value>,
}

impl ApiError {
    /// Inspect a parsed response envelope and return the business error it
    /// carries, if any. An envelope without a `code` key (e.g. the market
    /// data `result` envelopes) is treated as success.
    pub fn from_envelope(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let code = obj.get("code")?.as_i64()?;
        if code == 0 {
            return None;
        }
        Some(ApiError {
            code,
            msg: obj
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            kind: ApiErrorKind::classify(code),
            data: obj.get("data").filter(|d| !d.is_null()).cloned(),
        })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exchange error {:?} (code {}): {}",
            self.kind, self.code, self.msg
        )
    }
}

/// Classification of the Phemex business error codes the library knows
/// about. Everything else maps to [`ApiErrorKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 10001 - request rate limit exceeded
    RateLimitExceeded,
    /// 11004 - insufficient available balance for the order margin
    InsufficientMargin,
    /// 30018 - order price outside the allowed band
    InvalidPrice,
    /// 35004 - order id does not exist on the matching engine
    OrderNotFound,
    /// 35014 - client order id already used
    DuplicateOrder,
    /// 39996 - operation conflicts with the current position mode
    PositionModeConflict,
    /// Any code without a dedicated classification
    Other,
}

impl ApiErrorKind {
    /// Map a Phemex business error code to its classification.
    pub fn classify(code: i64) -> Self {
        match code {
            10001 => ApiErrorKind::RateLimitExceeded,
            11004 => ApiErrorKind::InsufficientMargin,
            30018 => ApiErrorKind::InvalidPrice,
            35004 => ApiErrorKind::OrderNotFound,
            35014 => ApiErrorKind::DuplicateOrder,
            39996 => ApiErrorKind::PositionModeConflict,
            _ => ApiErrorKind::Other,
        }
    }
}
