//! Order request and response models.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::orders::OrderBuilder;
use crate::time::{self, ms};

use super::decimal::PhemexDecimal;
use super::enums::{
    ExecInst, ExecStatus, OrderStatus, OrderType, PegPriceType, PosSide, Side, StopDirection,
    StpInstruction, TimeInForce, TriggerType,
};
use super::scale::AutoScale;
use super::serde_helpers::none_markers;

/// Request to place a new USD-M perpetual order.
///
/// Usually constructed through [`OrderRequest::builder`], which fills the
/// common defaults and runs [`OrderRequest::validate`] on build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Client assigned order ID
    #[serde(rename = "clOrdID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Trading symbol, e.g. BTCUSDT
    pub symbol: String,
    pub side: Side,
    /// Position side; `Merged` in one-way mode
    pub pos_side: PosSide,
    pub order_type: OrderType,
    /// Order quantity in contracts
    #[serde(rename = "orderQtyRq")]
    pub quantity: PhemexDecimal,
    /// Limit price; required for Limit orders
    #[serde(rename = "priceRp", skip_serializing_if = "Option::is_none")]
    pub price: Option<PhemexDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(rename = "pegPriceType", skip_serializing_if = "Option::is_none")]
    pub peg_type: Option<PegPriceType>,
    /// Offset from the reference price for pegged orders
    #[serde(rename = "pegOffsetValueRp", skip_serializing_if = "Option::is_none")]
    pub peg_offset: Option<PhemexDecimal>,
    /// Trigger price for conditional orders
    #[serde(rename = "stopPxRp", skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<PhemexDecimal>,
    /// Stop loss trigger price
    #[serde(rename = "stopLossRp", skip_serializing_if = "Option::is_none")]
    pub sl_price: Option<PhemexDecimal>,
    /// Alternative stop loss price provided by the exchange
    #[serde(rename = "slPxRp", skip_serializing_if = "Option::is_none")]
    pub sl_price_alt: Option<PhemexDecimal>,
    /// Take profit trigger price
    #[serde(rename = "takeProfitRp", skip_serializing_if = "Option::is_none")]
    pub tp_price: Option<PhemexDecimal>,
    /// Alternative take profit price provided by the exchange
    #[serde(rename = "tpPxRp", skip_serializing_if = "Option::is_none")]
    pub tp_price_alt: Option<PhemexDecimal>,
    #[serde(rename = "triggerType", skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerType>,
    /// Optional annotation or free text for the order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "slTrigger", skip_serializing_if = "Option::is_none")]
    pub sl_trigger: Option<TriggerType>,
    #[serde(rename = "tpTrigger", skip_serializing_if = "Option::is_none")]
    pub tp_trigger: Option<TriggerType>,
    /// If true, closes the position when the trigger condition is met
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_on_trigger: Option<bool>,
    #[serde(rename = "stpInstruction", skip_serializing_if = "Option::is_none")]
    pub stp_instruction: Option<StpInstruction>,
}

impl OrderRequest {
    /// Fluent builder with market + GoodTillCancel defaults.
    pub fn builder(symbol: impl Into<String>) -> OrderBuilder {
        OrderBuilder::new(symbol)
    }

    /// Cross-field rules the exchange would otherwise reject server-side.
    pub fn validate(&self) -> Result<()> {
        if self.quantity.is_zero() {
            return Err(Error::Validation(
                "quantity is required for all orders".to_string(),
            ));
        }
        if self.order_type == OrderType::Limit && self.price.is_none() {
            return Err(Error::Validation(
                "price is required for Limit orders".to_string(),
            ));
        }
        if self.order_type.is_conditional() && self.stop_price.is_none() {
            return Err(Error::Validation(format!(
                "stop price is required for {:?} orders",
                self.order_type
            )));
        }
        if self.tp_price.is_some() && self.tp_trigger.is_none() {
            return Err(Error::Validation(
                "take profit trigger is required when take profit price is set".to_string(),
            ));
        }
        if self.tp_price_alt.is_some() && self.tp_price.is_none() {
            return Err(Error::Validation(
                "alternative take profit price requires take profit price".to_string(),
            ));
        }
        if self.sl_price.is_some() && self.sl_trigger.is_none() {
            return Err(Error::Validation(
                "stop loss trigger is required when stop loss price is set".to_string(),
            ));
        }
        if self.sl_price_alt.is_some() && self.sl_price.is_none() {
            return Err(Error::Validation(
                "alternative stop loss price requires stop loss price".to_string(),
            ));
        }
        if self.reduce_only == Some(true) && self.close_on_trigger == Some(true) {
            return Err(Error::Validation(
                "reduce only and close on trigger cannot both be true".to_string(),
            ));
        }
        Ok(())
    }
}

impl AutoScale for OrderRequest {}

/// Shared output model of the order mutation endpoints (place, amend,
/// cancel). Everything is optional: the exchange echoes back whichever
/// fields apply to the acknowledged state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Exchange assigned order ID
    #[serde(rename = "orderID")]
    pub order_id: Option<String>,
    #[serde(rename = "clOrdID")]
    pub client_id: Option<String>,
    /// Phemex error code, 0 if no error
    #[serde(rename = "bizError")]
    pub error: Option<i64>,
    /// Registration time on the exchange, nanoseconds
    #[serde(rename = "actionTimeNs")]
    pub action_time_ns: Option<i64>,
    /// Fulfillment time on the exchange, nanoseconds
    #[serde(rename = "transactTimeNs")]
    pub trans_time_ns: Option<i64>,
    #[serde(rename = "ordStatus", default, deserialize_with = "none_markers")]
    pub order_status: Option<OrderStatus>,
    #[serde(rename = "execStatus", default, deserialize_with = "none_markers")]
    pub exec_status: Option<ExecStatus>,
    #[serde(rename = "execInst", default, deserialize_with = "none_markers")]
    pub exec_instructions: Option<ExecInst>,
    #[serde(default, deserialize_with = "none_markers")]
    pub order_type: Option<OrderType>,
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "none_markers")]
    pub side: Option<Side>,
    #[serde(rename = "orderQtyRq")]
    pub quantity: Option<PhemexDecimal>,
    #[serde(rename = "priceRp")]
    pub price: Option<PhemexDecimal>,
    pub reduce_only: Option<bool>,
    #[serde(default, deserialize_with = "none_markers")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(rename = "pegPriceType", default, deserialize_with = "none_markers")]
    pub peg_type: Option<PegPriceType>,
    #[serde(rename = "pegOffsetValueRp")]
    pub peg_offset: Option<PhemexDecimal>,
    #[serde(rename = "stopPxRp")]
    pub stop_price: Option<PhemexDecimal>,
    #[serde(rename = "stopLossRp")]
    pub sl_price: Option<PhemexDecimal>,
    #[serde(rename = "takeProfitRp")]
    pub tp_price: Option<PhemexDecimal>,
    #[serde(rename = "triggerType", default, deserialize_with = "none_markers")]
    pub trigger: Option<TriggerType>,
    /// Quantity closed against an open position
    #[serde(rename = "closedSizeRq")]
    pub closed_size: Option<PhemexDecimal>,
    /// Realized PnL for the closed portion of the order
    #[serde(rename = "closedPnlRv")]
    pub closed_pnl: Option<PhemexDecimal>,
    #[serde(rename = "cumQtyRq")]
    pub cum_qty: Option<PhemexDecimal>,
    #[serde(rename = "cumValueRv")]
    pub cum_value: Option<PhemexDecimal>,
    /// Remaining quantity yet to be filled
    #[serde(rename = "leavesQtyRq")]
    pub leaves_qty: Option<PhemexDecimal>,
    #[serde(rename = "leavesValueRv")]
    pub leaves_value: Option<PhemexDecimal>,
    /// Display quantity for iceberg orders
    #[serde(rename = "displayQtyRq")]
    pub display_qty: Option<PhemexDecimal>,
    #[serde(rename = "priceRq")]
    pub peg_price: Option<PhemexDecimal>,
    #[serde(rename = "pegOffsetProportionRr")]
    pub peg_proportion: Option<PhemexDecimal>,
}

impl AutoScale for OrderResponse {}

/// An order currently resting in the book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrder {
    #[serde(rename = "orderID")]
    pub order_id: String,
    #[serde(rename = "clOrdID")]
    pub client_id: Option<String>,
    /// Phemex error code, 0 if no error
    #[serde(rename = "bizError")]
    pub error: i64,
    pub order_type: OrderType,
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "actionTimeNs")]
    pub action_time: i64,
    #[serde(rename = "transactTimeNs")]
    pub trans_time: i64,
    #[serde(rename = "ordStatus")]
    pub order_status: OrderStatus,
    #[serde(rename = "orderQtyRq")]
    pub quantity: Option<PhemexDecimal>,
    #[serde(rename = "priceRp")]
    pub price: Option<PhemexDecimal>,
    pub reduce_only: Option<bool>,
    #[serde(default, deserialize_with = "none_markers")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(rename = "pegPriceType", default, deserialize_with = "none_markers")]
    pub peg_type: Option<PegPriceType>,
    #[serde(rename = "pegOffsetValueRp")]
    pub peg_offset: Option<PhemexDecimal>,
    #[serde(rename = "stopPxRp")]
    pub stop_price: Option<PhemexDecimal>,
    #[serde(rename = "stopLossRp")]
    pub sl_price: Option<PhemexDecimal>,
    #[serde(rename = "takeProfitRp")]
    pub tp_price: Option<PhemexDecimal>,
    #[serde(rename = "triggerType", default, deserialize_with = "none_markers")]
    pub trigger: Option<TriggerType>,
    #[serde(rename = "closedSizeRq")]
    pub closed_size: Option<PhemexDecimal>,
    #[serde(rename = "closedPnlRv")]
    pub closed_pnl: Option<PhemexDecimal>,
    #[serde(rename = "cumQtyRq")]
    pub cum_qty: Option<PhemexDecimal>,
    #[serde(rename = "cumValueRv")]
    pub cum_value: Option<PhemexDecimal>,
    #[serde(rename = "leavesQtyRq")]
    pub leaves_qty: Option<PhemexDecimal>,
    #[serde(rename = "leavesValueRv")]
    pub leaves_value: Option<PhemexDecimal>,
    #[serde(rename = "displayQtyRq")]
    pub display_qty: Option<PhemexDecimal>,
    #[serde(rename = "execInst", default, deserialize_with = "none_markers")]
    pub exec_instructions: Option<ExecInst>,
    #[serde(rename = "execStatus", default, deserialize_with = "none_markers")]
    pub exec_status: Option<ExecStatus>,
    #[serde(rename = "pegOffsetProportionRr")]
    pub peg_proportion: Option<PhemexDecimal>,
}

impl AutoScale for OpenOrder {}

/// Closed order from the history endpoint. This older endpoint speaks in
/// numeric codes rather than the string enumerations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedOrder {
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(rename = "clOrdId")]
    pub client_id: String,
    /// Creation timestamp, milliseconds
    pub created_at: i64,
    pub updated_at: i64,
    /// Numeric code for who initiated the action; ByUser(1)
    pub action_by: i32,
    #[serde(rename = "orderDetailsVos")]
    pub order_details: Option<String>,
    /// Created(0), Untriggered(1), Deactivated(2), Triggered(3), Rejected(4),
    /// New(5), PartiallyFilled(6), Filled(7), Canceled(8)
    #[serde(rename = "ordStatus")]
    pub order_status: i32,
    /// Aborted(2), MakerFill(6), TakerFill(7), Expired(8), Canceled(11),
    /// CreateRejected(19)
    #[serde(rename = "execStatus")]
    pub exec_status: i32,
    #[serde(rename = "bizError")]
    pub error: i32,
    pub symbol: String,
    /// Market(1), Limit(2), Stop(3), StopLimit(4), MarketIfTouched(5), ...
    #[serde(rename = "ordType")]
    pub order_type: i32,
    /// Trade(1), Funding(4), LiqTrade(6), AdlTrade(7)
    pub trade_type: i32,
    /// Merged(0), Long(1), Short(2)
    pub pos_side: i32,
    /// Buy(1), Sell(2)
    pub side: i32,
    #[serde(rename = "orderQtyRq")]
    pub quantity: PhemexDecimal,
    #[serde(rename = "priceRp")]
    pub price: PhemexDecimal,
    #[serde(rename = "pegPriceType")]
    pub peg_type: i32,
    #[serde(rename = "pegOffsetValueRp")]
    pub peg_offset: Option<PhemexDecimal>,
    /// Rising(1), Falling(2)
    pub stop_direction: i32,
    #[serde(rename = "stopPxRp")]
    pub stop_price: PhemexDecimal,
    pub trigger: i32,
    #[serde(rename = "displayQtyRq")]
    pub display_qty: Option<PhemexDecimal>,
    #[serde(rename = "execQtyRq")]
    pub exec_qty: PhemexDecimal,
    #[serde(rename = "leavesQtyRq")]
    pub leaves_qty: PhemexDecimal,
    #[serde(rename = "execPriceRp")]
    pub exec_price: PhemexDecimal,
    /// Average price of all fills for the order
    #[serde(rename = "avgTransactPriceRp")]
    pub avg_price: Option<PhemexDecimal>,
    #[serde(rename = "cumValueRv")]
    pub cum_value: PhemexDecimal,
    /// Nominal value of the order
    #[serde(rename = "orderValueRv")]
    pub order_value: PhemexDecimal,
    #[serde(rename = "leavesValueRv")]
    pub leaves_value: PhemexDecimal,
    #[serde(rename = "execFeeRv")]
    pub exec_fee: PhemexDecimal,
    #[serde(rename = "totalPnlRv")]
    pub total_pnl: Option<PhemexDecimal>,
}

impl AutoScale for ClosedOrder {}

/// Order from the orders-history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryItem {
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(rename = "clOrdId")]
    pub client_id: String,
    #[serde(rename = "ordStatus")]
    pub status: OrderStatus,
    #[serde(rename = "actionTimeNs")]
    pub action_time: i64,
    #[serde(rename = "transactTimeNs")]
    pub transact_time: i64,
    #[serde(rename = "bizError")]
    pub error: i64,
    #[serde(rename = "ordType")]
    pub order_type: OrderType,
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "orderQtyRq")]
    pub quantity: PhemexDecimal,
    #[serde(rename = "priceRp")]
    pub price: PhemexDecimal,
    #[serde(rename = "closedPnlRv")]
    pub closed_pnl: PhemexDecimal,
    #[serde(rename = "closedSizeRq")]
    pub closed_size: PhemexDecimal,
    #[serde(rename = "cumQtyRq")]
    pub cum_qty: PhemexDecimal,
    #[serde(rename = "cumValueRv")]
    pub cum_value: PhemexDecimal,
    #[serde(rename = "displayQtyRq")]
    pub display_qty: PhemexDecimal,
    #[serde(rename = "leavesQtyRq")]
    pub leaves_qty: PhemexDecimal,
    #[serde(rename = "leavesValueRv")]
    pub leaves_value: PhemexDecimal,
    pub reduce_only: bool,
    pub time_in_force: TimeInForce,
    #[serde(default, deserialize_with = "none_markers")]
    pub stop_direction: Option<StopDirection>,
    #[serde(rename = "stopLossRp")]
    pub sl_price: PhemexDecimal,
    #[serde(rename = "takeProfitRp")]
    pub tp_price: PhemexDecimal,
}

impl AutoScale for OrderHistoryItem {}

/// Request to amend an existing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmendOrderRequest {
    #[serde(rename = "orderID", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(rename = "clOrdID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub pos_side: PosSide,
    pub symbol: String,
    #[serde(rename = "orderQtyRq", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<PhemexDecimal>,
    #[serde(rename = "priceRp", skip_serializing_if = "Option::is_none")]
    pub price: Option<PhemexDecimal>,
    #[serde(rename = "pegPriceType", skip_serializing_if = "Option::is_none")]
    pub peg_type: Option<PegPriceType>,
    #[serde(rename = "pegOffsetValueRp", skip_serializing_if = "Option::is_none")]
    pub peg_offset: Option<PhemexDecimal>,
    #[serde(rename = "stopPxRp", skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<PhemexDecimal>,
    #[serde(rename = "stopLossRp", skip_serializing_if = "Option::is_none")]
    pub sl_price: Option<PhemexDecimal>,
    #[serde(rename = "takeProfitRp", skip_serializing_if = "Option::is_none")]
    pub tp_price: Option<PhemexDecimal>,
    #[serde(rename = "triggerType", skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerType>,
}

impl AmendOrderRequest {
    pub fn validate(&self) -> Result<()> {
        validate_exclusive_id(self.order_id.as_deref(), self.client_id.as_deref())?;
        let has_change = self.price.is_some()
            || self.quantity.is_some()
            || self.peg_type.is_some()
            || self.peg_offset.is_some()
            || self.stop_price.is_some()
            || self.sl_price.is_some()
            || self.tp_price.is_some()
            || self.trigger.is_some();
        if !has_change {
            return Err(Error::Validation(
                "cannot amend order without at least one change".to_string(),
            ));
        }
        Ok(())
    }
}

impl AutoScale for AmendOrderRequest {}

/// Request to cancel a single order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderRequest {
    #[serde(rename = "orderID", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(rename = "clOrdID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub symbol: String,
    pub pos_side: PosSide,
}

impl CancelOrderRequest {
    /// Cancel by exchange order ID.
    // TODO: extend configurability of the position side
    pub fn by_order_id(symbol: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            order_id: Some(order_id.into()),
            client_id: None,
            symbol: symbol.into(),
            pos_side: PosSide::Long,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_exclusive_id(self.order_id.as_deref(), self.client_id.as_deref())
    }
}

impl AutoScale for CancelOrderRequest {}

/// Request to cancel a batch of orders in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCancelOrderRequest {
    #[serde(rename = "orderID", skip_serializing_if = "Option::is_none")]
    pub order_ids: Option<Vec<String>>,
    #[serde(rename = "clOrdID", skip_serializing_if = "Option::is_none")]
    pub client_ids: Option<Vec<String>>,
    pub symbol: String,
    pub pos_side: PosSide,
}

impl BulkCancelOrderRequest {
    /// Cancel a batch by exchange order IDs.
    pub fn by_order_ids<I, S>(symbol: impl Into<String>, order_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order_ids: Some(order_ids.into_iter().map(Into::into).collect()),
            client_ids: None,
            symbol: symbol.into(),
            pos_side: PosSide::Long,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let has_order_ids = self.order_ids.as_ref().is_some_and(|ids| !ids.is_empty());
        let has_client_ids = self.client_ids.as_ref().is_some_and(|ids| !ids.is_empty());
        if !has_order_ids && !has_client_ids {
            return Err(Error::Validation(
                "either order IDs or client IDs must be provided".to_string(),
            ));
        }
        if has_order_ids && has_client_ids {
            return Err(Error::Validation(
                "provide only one of order IDs or client IDs, not both".to_string(),
            ));
        }
        Ok(())
    }
}

impl AutoScale for BulkCancelOrderRequest {}

/// Request to cancel every order for one or more symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAllOrdersRequest {
    /// Symbol, or comma-joined symbols; `None` sweeps the whole account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// True to target untriggered conditional orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub untriggered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CancelAllOrdersRequest {
    pub fn for_symbol(symbol: impl Into<String>, untriggered: bool) -> Self {
        Self {
            symbol: Some(symbol.into()),
            untriggered: Some(untriggered),
            text: None,
        }
    }

    /// The endpoint accepts multiple symbols joined by commas.
    pub fn for_symbols<I, S>(symbols: I, untriggered: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let joined = symbols
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            symbol: (!joined.is_empty()).then_some(joined),
            untriggered: Some(untriggered),
            text: None,
        }
    }
}

impl AutoScale for CancelAllOrdersRequest {}

/// Query for recently closed orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedOrdersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub currency: String,
    #[serde(rename = "ordStatus", skip_serializing_if = "Option::is_none")]
    pub order_status: Option<i32>,
    #[serde(rename = "ordType", skip_serializing_if = "Option::is_none")]
    pub order_type: Option<i32>,
    /// Window start, milliseconds
    pub start: i64,
    /// Window end, milliseconds
    pub end: i64,
    pub offset: i64,
    pub limit: i64,
    #[serde(rename = "withCount", skip_serializing_if = "Option::is_none")]
    pub with_count: Option<bool>,
}

impl ClosedOrdersRequest {
    /// Last week of closed orders for a symbol, newest page first.
    pub fn recent(symbol: impl Into<String>, currency: impl Into<String>) -> Self {
        let now = time::unix_now_millis();
        Self {
            symbol: Some(symbol.into()),
            currency: currency.into(),
            order_status: None,
            order_type: None,
            start: now - ms::WEEK,
            end: now - ms::MINUTE,
            offset: 0,
            limit: 200,
            with_count: None,
        }
    }
}

impl AutoScale for ClosedOrdersRequest {}

fn validate_exclusive_id(order_id: Option<&str>, client_id: Option<&str>) -> Result<()> {
    match (order_id, client_id) {
        (None, None) => Err(Error::Validation(
            "either order ID or client ID must be provided".to_string(),
        )),
        (Some(_), Some(_)) => Err(Error::Validation(
            "provide only one of order ID or client ID, not both".to_string(),
        )),
        _ => Ok(()),
    }
}
