//! Market data models: order book, klines, tickers, trades, funding rates.
//!
//! The v2 market data endpoints encode rows as positional arrays; the models
//! here decode them into named fields.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::decimal::PhemexDecimal;
use super::enums::Side;
use super::scale::AutoScale;

/// One price level of the order book, decoded from a `[price, size]` pair.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderBookEntry {
    #[serde(rename = "priceRp")]
    pub price: PhemexDecimal,
    #[serde(rename = "sizeRp")]
    pub size: PhemexDecimal,
}

impl<'de> Deserialize<'de> for OrderBookEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (price, size) = <(PhemexDecimal, PhemexDecimal)>::deserialize(deserializer)?;
        Ok(Self { price, size })
    }
}

/// Both sides of the book, best price first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookData {
    pub asks: Vec<OrderBookEntry>,
    pub bids: Vec<OrderBookEntry>,
}

impl OrderBookData {
    pub fn best_ask(&self) -> Option<&OrderBookEntry> {
        self.asks.first()
    }

    pub fn best_bid(&self) -> Option<&OrderBookEntry> {
        self.bids.first()
    }
}

/// Payload of the order book endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookResponse {
    #[serde(rename = "orderbook_p")]
    pub orderbook: OrderBookData,
    pub symbol: String,
    /// Depth of the order book data
    pub depth: i64,
    #[serde(rename = "type")]
    pub kind: String,
    /// Sequence number of the order book update
    pub sequence: i64,
    pub timestamp: i64,
    /// Timestamp (ms) when the data was generated
    pub dts: i64,
    /// Timestamp for validating order book matching
    pub mts: i64,
}

impl AutoScale for OrderBookResponse {}

/// Query for kline/candlestick data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KlineRequest {
    pub symbol: String,
    /// Time resolution in seconds
    pub resolution: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl AutoScale for KlineRequest {}

/// One candle, decoded from the positional row
/// `[timestamp, lastClose, open, high, low, close, volume, turnover]`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Kline {
    pub timestamp: i64,
    pub last_close: PhemexDecimal,
    pub open: PhemexDecimal,
    pub high: PhemexDecimal,
    pub low: PhemexDecimal,
    pub close: PhemexDecimal,
    /// Volume in contracts
    pub volume: PhemexDecimal,
    /// Notional turnover
    pub turnover: PhemexDecimal,
}

impl<'de> Deserialize<'de> for Kline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Kline;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a kline row of 8 elements")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Kline, A::Error> {
                let mut next = |what: &'static str| {
                    seq.next_element::<serde_json::Value>()
                        .and_then(|v| v.ok_or_else(|| de::Error::custom(format!("missing {what}"))))
                };
                let timestamp = next("timestamp")?;
                let last_close = next("last close")?;
                let open = next("open")?;
                let high = next("high")?;
                let low = next("low")?;
                let close = next("close")?;
                let volume = next("volume")?;
                let turnover = next("turnover")?;

                // Tolerate rows that grow extra columns.
                while seq
                    .next_element::<serde::de::IgnoredAny>()?
                    .is_some()
                {}

                let decimal = |v: serde_json::Value| {
                    PhemexDecimal::deserialize(v).map_err(de::Error::custom)
                };
                Ok(Kline {
                    timestamp: i64::deserialize(timestamp).map_err(de::Error::custom)?,
                    last_close: decimal(last_close)?,
                    open: decimal(open)?,
                    high: decimal(high)?,
                    low: decimal(low)?,
                    close: decimal(close)?,
                    volume: decimal(volume)?,
                    turnover: decimal(turnover)?,
                })
            }
        }

        deserializer.deserialize_seq(RowVisitor)
    }
}

impl AutoScale for Kline {}

/// 24h ticker snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    pub timestamp: i64,
    /// Current best ask price
    #[serde(rename = "askRp")]
    pub ask: PhemexDecimal,
    /// Current best bid price
    #[serde(rename = "bidRp")]
    pub bid: PhemexDecimal,
    #[serde(rename = "markRp")]
    pub mark: PhemexDecimal,
    /// Last traded price
    #[serde(rename = "lastRp")]
    pub last: PhemexDecimal,
    /// Opening price in the last 24h
    #[serde(rename = "openRp")]
    pub open: PhemexDecimal,
    #[serde(rename = "highRp")]
    pub high: PhemexDecimal,
    #[serde(rename = "lowRp")]
    pub low: PhemexDecimal,
    /// Underlying index price
    #[serde(rename = "indexRp")]
    pub index: PhemexDecimal,
    #[serde(rename = "openInterestRv")]
    pub open_interest: PhemexDecimal,
    /// 24h notional turnover
    #[serde(rename = "turnoverRv")]
    pub turnover: PhemexDecimal,
    /// 24h trading volume in contracts
    #[serde(rename = "volumeRq")]
    pub volume: PhemexDecimal,
    #[serde(rename = "fundingRateRr")]
    pub funding_rate: PhemexDecimal,
    #[serde(rename = "predFundingRateRr")]
    pub pred_funding_rate: PhemexDecimal,
}

impl Ticker {
    /// Midpoint between best bid and best ask.
    pub fn mid(&self) -> PhemexDecimal {
        (self.bid + self.ask) / PhemexDecimal::from(2)
    }
}

impl AutoScale for Ticker {}

/// One public trade, decoded from `[timestamp, side, price, size]`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Trade {
    pub timestamp: i64,
    pub side: Side,
    pub price: PhemexDecimal,
    pub size: PhemexDecimal,
}

impl<'de> Deserialize<'de> for Trade {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (timestamp, side, price, size) =
            <(i64, Side, PhemexDecimal, PhemexDecimal)>::deserialize(deserializer)?;
        Ok(Self {
            timestamp,
            side,
            price,
            size,
        })
    }
}

/// Payload of the recent-trades endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradesResponse {
    #[serde(rename = "trades_p")]
    pub trades: Vec<Trade>,
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sequence: i64,
    pub dts: i64,
    pub mts: i64,
}

impl AutoScale for TradesResponse {}

/// Query for historical funding rates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Column to order the results by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by_column: Option<String>,
    /// Order direction, `asc` or `desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
}

impl FundingRateRequest {
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }
}

impl AutoScale for FundingRateRequest {}

/// One funding rate observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingRateItem {
    pub symbol: String,
    /// Interval in seconds between funding payments
    #[serde(rename = "fundingInterval")]
    pub funding_interval: i64,
    /// Seconds until the next funding event
    #[serde(rename = "toNextfundingInterval")]
    pub remaining_funding_time: i64,
    /// Timestamp (ms) of the next funding event
    #[serde(rename = "nextfundingTime")]
    pub next_funding_time: i64,
    #[serde(rename = "fundingRate")]
    pub funding_rate: PhemexDecimal,
    #[serde(rename = "interestRate")]
    pub interest_rate: PhemexDecimal,
    /// Maximum allowable funding rate
    #[serde(rename = "fundingRateCap")]
    pub rate_cap: PhemexDecimal,
    /// Minimum allowable funding rate
    #[serde(rename = "fundingRateFloor")]
    pub rate_floor: PhemexDecimal,
}

impl AutoScale for FundingRateItem {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> PhemexDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn order_book_decodes_pair_arrays() {
        let resp: OrderBookResponse = serde_json::from_value(json!({
            "orderbook_p": {
                "asks": [["50001", "0.5"], ["50002", "1.2"]],
                "bids": [["50000", "0.8"]]
            },
            "symbol": "BTCUSDT",
            "depth": 30,
            "type": "snapshot",
            "sequence": 77_736_167,
            "timestamp": 1_667_222_412_392_789_551_i64,
            "dts": 1_667_222_412_000_i64,
            "mts": 1_667_222_412_100_i64
        }))
        .unwrap();

        assert_eq!(resp.orderbook.asks.len(), 2);
        assert_eq!(resp.orderbook.best_ask().unwrap().price, dec("50001"));
        assert_eq!(resp.orderbook.best_bid().unwrap().size, dec("0.8"));
        assert_eq!(resp.kind, "snapshot");
    }

    #[test]
    fn kline_decodes_positional_row() {
        let kline: Kline = serde_json::from_value(json!([
            1_667_220_000, "16830", "16829.5", "16833", "16825", "16830.5", "12.345", "207765.4"
        ]))
        .unwrap();
        assert_eq!(kline.timestamp, 1_667_220_000);
        assert_eq!(kline.last_close, dec("16830"));
        assert_eq!(kline.open, dec("16829.5"));
        assert_eq!(kline.high, dec("16833"));
        assert_eq!(kline.low, dec("16825"));
        assert_eq!(kline.close, dec("16830.5"));
        assert_eq!(kline.volume, dec("12.345"));
        assert_eq!(kline.turnover, dec("207765.4"));
    }

    #[test]
    fn short_kline_row_is_an_error() {
        let row = json!([1_667_220_000, "16830"]);
        assert!(serde_json::from_value::<Kline>(row).is_err());
    }

    #[test]
    fn trade_decodes_positional_row() {
        let trade: Trade =
            serde_json::from_value(json!([1_667_222_412_392_789_551_i64, "Buy", "50000", "0.01"]))
                .unwrap();
        assert_eq!(trade.side, Side::Buy);
        assert_eq!(trade.price, dec("50000"));
        assert_eq!(trade.size, dec("0.01"));
    }

    #[test]
    fn trades_response_decodes_rows() {
        let resp: TradesResponse = serde_json::from_value(json!({
            "trades_p": [
                [1_667_222_412_000_000_000_i64, "Buy", "50000", "0.01"],
                [1_667_222_413_000_000_000_i64, "Sell", "49999", "0.02"]
            ],
            "symbol": "BTCUSDT",
            "type": "snapshot",
            "sequence": 12,
            "dts": 1,
            "mts": 2
        }))
        .unwrap();
        assert_eq!(resp.trades.len(), 2);
        assert_eq!(resp.trades[1].side, Side::Sell);
    }

    #[test]
    fn ticker_mid_is_exact() {
        let ticker: Ticker = serde_json::from_value(json!({
            "symbol": "BTCUSDT",
            "timestamp": 1_667_222_412_i64,
            "askRp": "50001",
            "bidRp": "50000",
            "markRp": "50000.5",
            "lastRp": "50000",
            "openRp": "49000",
            "highRp": "51000",
            "lowRp": "48800",
            "indexRp": "50000.2",
            "openInterestRv": "1234.5",
            "turnoverRv": "987654.3",
            "volumeRq": "456.7",
            "fundingRateRr": "0.0001",
            "predFundingRateRr": "0.0001"
        }))
        .unwrap();
        assert_eq!(ticker.mid(), dec("50000.5"));
    }

    #[test]
    fn funding_rate_request_defaults() {
        let req = FundingRateRequest::for_symbol("BTCUSDT");
        assert_eq!(req.symbol.as_deref(), Some("BTCUSDT"));
        let encoded = serde_json::to_value(&req).unwrap();
        assert_eq!(encoded, json!({"symbol": "BTCUSDT"}));
    }
}
