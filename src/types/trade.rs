//! User trade history and funding fee models.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::decimal::PhemexDecimal;
use super::enums::{ExecStatus, OrderType, PosSide, Side};
use super::scale::AutoScale;

/// Query for the recent user-trades endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTradeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Trade(1), LiqTrade(6), AdlTrade(7)
    #[serde(rename = "execType", skip_serializing_if = "Option::is_none")]
    pub exec_type: Option<i32>,
    #[serde(rename = "withCount", skip_serializing_if = "Option::is_none")]
    pub with_count: Option<bool>,
}

impl UserTradeRequest {
    pub fn recent(symbol: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            currency: Some(currency.into()),
            offset: Some(0),
            limit: Some(200),
            exec_type: None,
            with_count: Some(false),
        }
    }
}

impl AutoScale for UserTradeRequest {}

/// One fill from the recent user-trades endpoint (numeric-code flavor).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTrade {
    pub symbol: String,
    pub currency: String,
    #[serde(rename = "orderQtyRq")]
    pub quantity: PhemexDecimal,
    #[serde(rename = "priceRp")]
    pub price: PhemexDecimal,
    /// Fee rate applied to this fill
    #[serde(rename = "feeRateRr")]
    pub fee_rate: PhemexDecimal,
    #[serde(rename = "execQtyRq")]
    pub exec_qty: PhemexDecimal,
    #[serde(rename = "execPriceRp")]
    pub exec_price: PhemexDecimal,
    /// Nominal value of the execution
    #[serde(rename = "execValueRv")]
    pub exec_value: PhemexDecimal,
    #[serde(rename = "execFeeRv")]
    pub exec_fee: PhemexDecimal,
    /// New(1), Cancel(2), Replace(3), CancelAll(4), SettleFundingFee(13)
    pub action: i32,
    /// Creation timestamp, milliseconds
    pub created_at: i64,
    /// Trade(1), Funding(4), LiqTrade(6), AdlTrade(7)
    pub trade_type: i32,
    #[serde(rename = "ordType")]
    pub order_type: i32,
    /// Buy(1), Sell(2)
    pub side: i32,
    /// Merged(0), Long(1), Short(2)
    pub pos_side: i32,
    #[serde(rename = "execId")]
    pub exec_id: String,
    #[serde(rename = "execStatus")]
    pub exec_status: i32,
    #[serde(rename = "ptFeeRv")]
    pub position_fee: PhemexDecimal,
    #[serde(rename = "ptPriceRp")]
    pub position_price: PhemexDecimal,
    #[serde(rename = "pegPriceType")]
    pub peg_type: i32,
    #[serde(rename = "pegOffsetValueRp")]
    pub peg_offset: Option<PhemexDecimal>,
}

impl AutoScale for UserTrade {}

/// Query for the trades-history endpoint. Takes a symbol or a currency,
/// never both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeHistoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Window start, milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Window end, milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

impl TradeHistoryRequest {
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        match (&self.symbol, &self.currency) {
            (None, None) => Err(Error::Validation(
                "either symbol or currency must be provided".to_string(),
            )),
            (Some(_), Some(_)) => Err(Error::Validation(
                "provide only one of symbol or currency, not both".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl AutoScale for TradeHistoryRequest {}

/// One fill from the trades-history endpoint (string-enum flavor).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeHistoryItem {
    pub symbol: String,
    pub currency: String,
    #[serde(rename = "orderQtyRq")]
    pub quantity: PhemexDecimal,
    #[serde(rename = "priceRp")]
    pub price: PhemexDecimal,
    #[serde(rename = "feeRateRr")]
    pub fee_rate: PhemexDecimal,
    #[serde(rename = "execQtyRq")]
    pub exec_qty: PhemexDecimal,
    #[serde(rename = "execPriceRp")]
    pub exec_price: PhemexDecimal,
    #[serde(rename = "execValueRv")]
    pub exec_value: PhemexDecimal,
    #[serde(rename = "execFeeRv")]
    pub exec_fee: PhemexDecimal,
    #[serde(rename = "orderID")]
    pub order_id: String,
    #[serde(rename = "clOrdID")]
    pub client_id: String,
    /// Action taken on the order, e.g. New, Cancel
    pub action: String,
    #[serde(rename = "transactTimeNs")]
    pub transaction_time: i64,
    pub trade_type: String,
    #[serde(rename = "ordType")]
    pub order_type: OrderType,
    pub side: Side,
    pub pos_side: PosSide,
    #[serde(rename = "execID")]
    pub exec_id: String,
    #[serde(rename = "execStatus")]
    pub exec_status: ExecStatus,
    #[serde(rename = "closedSizeRq")]
    pub closed_size: PhemexDecimal,
    #[serde(rename = "closedPnlRv")]
    pub closed_pnl: PhemexDecimal,
}

impl AutoScale for TradeHistoryItem {}

/// Query for the funding fee history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingFeeRequest {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl FundingFeeRequest {
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            offset: None,
            limit: None,
        }
    }
}

impl AutoScale for FundingFeeRequest {}

/// One funding fee settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingFeeItem {
    pub symbol: String,
    pub currency: String,
    pub side: Side,
    /// Settlement timestamp, milliseconds
    #[serde(rename = "createTime")]
    pub created_at: i64,
    #[serde(rename = "execQtyRq")]
    pub exec_qty: PhemexDecimal,
    #[serde(rename = "execPriceRp")]
    pub exec_price: PhemexDecimal,
    #[serde(rename = "execValueRv")]
    pub exec_value: PhemexDecimal,
    /// Funding fee paid or received at this settlement
    #[serde(rename = "execFeeRv")]
    pub exec_fee: PhemexDecimal,
    #[serde(rename = "fundingRateRr")]
    pub funding_rate: PhemexDecimal,
    #[serde(rename = "feeRateRr")]
    pub fee_rate: PhemexDecimal,
}

impl AutoScale for FundingFeeItem {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trade_history_request_needs_exactly_one_scope() {
        assert!(TradeHistoryRequest::default().validate().is_err());

        let by_symbol = TradeHistoryRequest::for_symbol("BTCUSDT");
        assert!(by_symbol.validate().is_ok());

        let both = TradeHistoryRequest {
            symbol: Some("BTCUSDT".to_string()),
            currency: Some("USDT".to_string()),
            ..TradeHistoryRequest::default()
        };
        assert!(both.validate().is_err());

        let by_currency = TradeHistoryRequest {
            currency: Some("USDT".to_string()),
            ..TradeHistoryRequest::default()
        };
        assert!(by_currency.validate().is_ok());
    }

    #[test]
    fn user_trade_request_defaults() {
        let req = UserTradeRequest::recent("BTCUSDT", "USDT");
        let encoded = serde_json::to_value(&req).unwrap();
        assert_eq!(
            encoded,
            json!({
                "symbol": "BTCUSDT",
                "currency": "USDT",
                "offset": 0,
                "limit": 200,
                "withCount": false
            })
        );
    }

    #[test]
    fn trade_history_item_parses() {
        let item: TradeHistoryItem = serde_json::from_value(json!({
            "symbol": "BTCUSDT",
            "currency": "USDT",
            "orderQtyRq": "0.01",
            "priceRp": "20000",
            "feeRateRr": "0.0006",
            "execQtyRq": "0.01",
            "execPriceRp": "20000",
            "execValueRv": "200",
            "execFeeRv": "0.12",
            "orderID": "5ef8f...",
            "clOrdID": "mine-1",
            "action": "New",
            "transactTimeNs": 1_667_562_110_221_077_395_i64,
            "tradeType": "Trade",
            "ordType": "Limit",
            "side": "Buy",
            "posSide": "Long",
            "execID": "8718cc...",
            "execStatus": "MakerFill",
            "closedSizeRq": "0",
            "closedPnlRv": "0"
        }))
        .unwrap();
        assert_eq!(item.exec_status, ExecStatus::MakerFill);
        assert_eq!(item.order_type, OrderType::Limit);
        assert_eq!(item.exec_fee, "0.12".parse().unwrap());
    }

    #[test]
    fn funding_fee_item_parses() {
        let item: FundingFeeItem = serde_json::from_value(json!({
            "symbol": "BTCUSDT",
            "currency": "USDT",
            "side": "Sell",
            "createTime": 1_672_531_200_000_i64,
            "execQtyRq": "0.5",
            "execPriceRp": "16500",
            "execValueRv": "8250",
            "execFeeRv": "0.825",
            "fundingRateRr": "0.0001",
            "feeRateRr": "0.0001"
        }))
        .unwrap();
        assert_eq!(item.side, Side::Sell);
        assert_eq!(item.funding_rate, "0.0001".parse().unwrap());
    }
}
