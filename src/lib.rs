//! # phemex-rs
//!
//! A Rust client library for the Phemex USD-M perpetual REST API
//! (<https://phemex-docs.github.io/>).
//!
//! This library provides a typed, async interface for:
//! - Market data queries (public)
//! - Order placement, amendment, and cancellation (authenticated)
//! - Account, position, and risk operations (authenticated)
//! - Funding and trade history
//!
//! ## Features
//!
//! - **Scaled Decimals**: Phemex encodes legacy prices, values, and rates
//!   as scaled integers (`Ep`/`Ev`/`Er` fields). Models descale them to
//!   exact human values on validation and rescale them on serialization,
//!   driven by the bundled per-instrument product catalog — no floating
//!   point anywhere in the pipeline.
//! - **Builder Pattern**: Fluent API for constructing orders
//! - **Proper Error Handling**: No panics, typed business errors
//! - **HMAC Signing**: Request signatures over path + query + expiry + body
//!
//! ## Quick start
//!
//! ```no_run
//! use phemex_rs::{Credentials, Endpoint, OrderRequest, PhemexClient};
//!
//! # async fn run() -> phemex_rs::Result<()> {
//! let client = PhemexClient::new(
//!     Endpoint::Testnet,
//!     Credentials::new("api-key", "api-secret"),
//! );
//!
//! let ticker = client.usdm().ticker("BTCUSDT").await?;
//! println!("BTCUSDT mid: {}", ticker.mid());
//!
//! let order = OrderRequest::builder("BTCUSDT")
//!     .increase_long("0.01".parse()?)
//!     .limit("50000".parse()?)
//!     .build()?;
//! client.usdm().place_order(&order).await?;
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod client;
pub mod config;
pub mod error;
pub mod orders;
pub mod products;
pub mod request;
pub mod signing;
pub mod time;
pub mod types;

// Internal modules
mod http;

// Re-export commonly used types
pub use client::{PhemexClient, UsdmClient};
pub use config::{Credentials, Endpoint};
pub use error::{ApiError, ApiErrorKind, Error, Result};
pub use http::RateLimitInfo;
pub use orders::OrderBuilder;
pub use products::{ProductCatalog, SymbolScales};
pub use types::scale::{AutoScale, ScaleDimension};
pub use types::{
    Numeric, OrderRequest, OrderStatus, OrderType, PhemexDecimal, PosMode, PosSide, Side,
    TimeInForce,
};
