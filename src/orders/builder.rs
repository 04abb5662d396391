//! Fluent construction of place-order requests.

use crate::error::{Error, Result};
use crate::types::{
    OrderRequest, OrderType, PhemexDecimal, PosSide, Side, StpInstruction, TimeInForce,
    TriggerType,
};

/// Builder for [`OrderRequest`].
///
/// Defaults (each easily overridden): Market order, GoodTillCancel. The
/// direction comes from one of the four position-intent methods; [`build`]
/// fails if none was called.
///
/// ```ignore
/// let order = OrderRequest::builder("BTCUSDT")
///     .increase_long("0.01".parse()?)
///     .limit("50000".parse()?)
///     .build()?;
/// ```
///
/// [`build`]: OrderBuilder::build
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    symbol: String,
    order_type: OrderType,
    time_in_force: Option<TimeInForce>,
    client_id: Option<String>,
    side: Option<Side>,
    pos_side: Option<PosSide>,
    quantity: Option<PhemexDecimal>,
    price: Option<PhemexDecimal>,
    stop_price: Option<PhemexDecimal>,
    trigger: Option<TriggerType>,
    sl_price: Option<PhemexDecimal>,
    sl_trigger: Option<TriggerType>,
    tp_price: Option<PhemexDecimal>,
    tp_trigger: Option<TriggerType>,
    reduce_only: Option<bool>,
    close_on_trigger: Option<bool>,
    stp_instruction: Option<StpInstruction>,
    text: Option<String>,
}

impl OrderBuilder {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_type: OrderType::Market,
            time_in_force: Some(TimeInForce::GoodTillCancel),
            client_id: None,
            side: None,
            pos_side: None,
            quantity: None,
            price: None,
            stop_price: None,
            trigger: None,
            sl_price: None,
            sl_trigger: None,
            tp_price: None,
            tp_trigger: None,
            reduce_only: None,
            close_on_trigger: None,
            stp_instruction: None,
            text: None,
        }
    }

    fn intent(mut self, qty: PhemexDecimal, pos_side: PosSide, side: Side, reduce: bool) -> Self {
        self.quantity = Some(qty);
        self.pos_side = Some(pos_side);
        self.side = Some(side);
        self.reduce_only = Some(reduce);
        self
    }

    /// Open or grow a long position with a Buy order.
    pub fn increase_long(self, qty: PhemexDecimal) -> Self {
        self.intent(qty, PosSide::Long, Side::Buy, false)
    }

    /// Reduce a long position with a Sell order.
    pub fn reduce_long(self, qty: PhemexDecimal) -> Self {
        self.intent(qty, PosSide::Long, Side::Sell, true)
    }

    /// Open or grow a short position with a Sell order.
    pub fn increase_short(self, qty: PhemexDecimal) -> Self {
        self.intent(qty, PosSide::Short, Side::Sell, false)
    }

    /// Reduce a short position with a Buy order.
    pub fn reduce_short(self, qty: PhemexDecimal) -> Self {
        self.intent(qty, PosSide::Short, Side::Buy, true)
    }

    /// Make this a limit order at the given price.
    pub fn limit(mut self, price: PhemexDecimal) -> Self {
        self.order_type = OrderType::Limit;
        self.price = Some(price);
        self
    }

    /// Make this a stop order triggered at the given price by last price.
    pub fn stop(mut self, stop_price: PhemexDecimal) -> Self {
        self.order_type = OrderType::Stop;
        self.stop_price = Some(stop_price);
        self.trigger = Some(TriggerType::ByLastPrice);
        self
    }

    /// Attach a take profit trigger.
    pub fn take_profit(mut self, price: PhemexDecimal, trigger: TriggerType) -> Self {
        self.tp_price = Some(price);
        self.tp_trigger = Some(trigger);
        self
    }

    /// Attach a stop loss trigger.
    pub fn stop_loss(mut self, price: PhemexDecimal, trigger: TriggerType) -> Self {
        self.sl_price = Some(price);
        self.sl_trigger = Some(trigger);
        self
    }

    /// Override the GoodTillCancel default.
    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Tag the order with a client-assigned ID for later lookups.
    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    pub fn stp_instruction(mut self, stp: StpInstruction) -> Self {
        self.stp_instruction = Some(stp);
        self
    }

    /// Free-text annotation for the order.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Assemble and validate the final request.
    pub fn build(self) -> Result<OrderRequest> {
        let (side, pos_side, quantity) = match (self.side, self.pos_side, self.quantity) {
            (Some(side), Some(pos_side), Some(quantity)) => (side, pos_side, quantity),
            _ => {
                return Err(Error::Validation(
                    "order direction not set: call one of increase_long, reduce_long, \
                     increase_short, reduce_short"
                        .to_string(),
                ))
            }
        };

        let request = OrderRequest {
            client_id: self.client_id,
            symbol: self.symbol,
            side,
            pos_side,
            order_type: self.order_type,
            quantity,
            price: self.price,
            reduce_only: self.reduce_only,
            time_in_force: self.time_in_force,
            peg_type: None,
            peg_offset: None,
            stop_price: self.stop_price,
            sl_price: self.sl_price,
            sl_price_alt: None,
            tp_price: self.tp_price,
            tp_price_alt: None,
            trigger: self.trigger,
            text: self.text,
            sl_trigger: self.sl_trigger,
            tp_trigger: self.tp_trigger,
            close_on_trigger: self.close_on_trigger,
            stp_instruction: self.stp_instruction,
        };
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> PhemexDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn defaults_are_market_gtc() {
        let order = OrderRequest::builder("BTCUSDT")
            .increase_long(dec("1"))
            .build()
            .unwrap();
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.time_in_force, Some(TimeInForce::GoodTillCancel));
        assert_eq!(order.symbol, "BTCUSDT");
    }

    #[test]
    fn position_intents_set_side_and_reduce_flag() {
        let open_long = OrderRequest::builder("BTCUSDT")
            .increase_long(dec("1"))
            .build()
            .unwrap();
        assert_eq!(open_long.side, Side::Buy);
        assert_eq!(open_long.pos_side, PosSide::Long);
        assert_eq!(open_long.reduce_only, Some(false));

        let close_long = OrderRequest::builder("BTCUSDT")
            .reduce_long(dec("1"))
            .build()
            .unwrap();
        assert_eq!(close_long.side, Side::Sell);
        assert_eq!(close_long.pos_side, PosSide::Long);
        assert_eq!(close_long.reduce_only, Some(true));

        let open_short = OrderRequest::builder("BTCUSDT")
            .increase_short(dec("1"))
            .build()
            .unwrap();
        assert_eq!(open_short.side, Side::Sell);
        assert_eq!(open_short.pos_side, PosSide::Short);

        let close_short = OrderRequest::builder("BTCUSDT")
            .reduce_short(dec("1"))
            .build()
            .unwrap();
        assert_eq!(close_short.side, Side::Buy);
        assert_eq!(close_short.pos_side, PosSide::Short);
        assert_eq!(close_short.reduce_only, Some(true));
    }

    #[test]
    fn limit_sets_type_and_price() {
        let order = OrderRequest::builder("BTCUSDT")
            .increase_long(dec("1"))
            .limit(dec("12345"))
            .build()
            .unwrap();
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.price, Some(dec("12345")));
    }

    #[test]
    fn stop_sets_trigger_by_last_price() {
        let order = OrderRequest::builder("BTCUSDT")
            .reduce_long(dec("1"))
            .stop(dec("45000"))
            .build()
            .unwrap();
        assert_eq!(order.order_type, OrderType::Stop);
        assert_eq!(order.stop_price, Some(dec("45000")));
        assert_eq!(order.trigger, Some(TriggerType::ByLastPrice));
    }

    #[test]
    fn take_profit_and_stop_loss_carry_triggers() {
        let order = OrderRequest::builder("BTCUSDT")
            .increase_long(dec("1"))
            .take_profit(dec("60000"), TriggerType::ByMarkPrice)
            .stop_loss(dec("40000"), TriggerType::ByLastPrice)
            .build()
            .unwrap();
        assert_eq!(order.tp_price, Some(dec("60000")));
        assert_eq!(order.tp_trigger, Some(TriggerType::ByMarkPrice));
        assert_eq!(order.sl_price, Some(dec("40000")));
        assert_eq!(order.sl_trigger, Some(TriggerType::ByLastPrice));
    }

    #[test]
    fn client_order_id_is_carried() {
        let order = OrderRequest::builder("BTCUSDT")
            .increase_long(dec("1"))
            .client_order_id("my-unique-id-123")
            .build()
            .unwrap();
        assert_eq!(order.client_id.as_deref(), Some("my-unique-id-123"));

        let without = OrderRequest::builder("BTCUSDT")
            .increase_long(dec("1"))
            .build()
            .unwrap();
        assert!(without.client_id.is_none());
    }

    #[test]
    fn tif_override() {
        let order = OrderRequest::builder("BTCUSDT")
            .increase_long(dec("1"))
            .limit(dec("50000"))
            .time_in_force(TimeInForce::PostOnly)
            .build()
            .unwrap();
        assert_eq!(order.time_in_force, Some(TimeInForce::PostOnly));
    }

    #[test]
    fn build_without_intent_fails() {
        let err = OrderRequest::builder("BTCUSDT").build().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn build_runs_request_validation() {
        // Limit order without a price is caught at build time.
        let err = OrderRequest::builder("BTCUSDT")
            .increase_long(dec("0"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
