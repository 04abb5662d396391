//! Exchange enumerations, spelled exactly as they appear on the wire.

use serde::{Deserialize, Serialize};

/// Direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        }
    }

    /// The side that offsets this one.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Position side in hedge mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosSide {
    /// One-way mode's single merged position
    Merged,
    Long,
    Short,
}

impl PosSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosSide::Merged => "Merged",
            PosSide::Long => "Long",
            PosSide::Short => "Short",
        }
    }
}

/// Position mode of an account or symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosMode {
    OneWay,
    Hedged,
}

impl PosMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosMode::OneWay => "OneWay",
            PosMode::Hedged => "Hedged",
        }
    }
}

/// Margin mode of a position, derived from the sign of its leverage:
/// non-positive leverage means cross margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarginMode {
    Cross,
    Isolated,
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    LimitIfTouched,
    Market,
    MarketAsLimit,
    MarketIfTouched,
    MarketIfTouchedAsLimit,
    Stop,
    StopAsLimit,
    StopLimit,
    ProtectedMarket,
    Bracket,
    BoTpLimit,
    BoSlLimit,
    BoSlMarket,
}

impl OrderType {
    /// Conditional order types require a stop/trigger price.
    pub fn is_conditional(&self) -> bool {
        !matches!(
            self,
            OrderType::Limit | OrderType::Market | OrderType::MarketAsLimit
        )
    }
}

/// How long an order remains active before execution or expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    GoodTillCancel,
    ImmediateOrCancel,
    FillOrKill,
    PostOnly,
}

/// Price source that triggers a conditional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerType {
    ByMarkPrice,
    ByIndexPrice,
    ByLastPrice,
    ByAskPrice,
    ByBidPrice,
    ByMarkPriceLimit,
    ByLastPriceLimit,
}

/// Direction a stop order watches the trigger price from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopDirection {
    Rising,
    Falling,
}

/// Reference price for pegged orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PegPriceType {
    LastPeg,
    MidPricePeg,
    MarketPeg,
    PrimaryPeg,
    TrailingStopPeg,
    TrailingTakeProfitPeg,
}

/// Self-trade prevention instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StpInstruction {
    None,
    CancelMaker,
    CancelTaker,
    CancelBoth,
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Acked from the order request, a transient state
    Created,
    /// Same as Created, a transient state
    Init,
    /// Conditional order waiting to be triggered
    Untriggered,
    /// Conditional order being triggered
    Triggered,
    /// Untriggered conditional order being removed
    Deactivated,
    Rejected,
    /// Resting in the order book
    New,
    PartiallyFilled,
    Filled,
    Canceled,
}

impl OrderStatus {
    /// Whether the order can no longer transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Rejected
                | OrderStatus::Filled
                | OrderStatus::Canceled
                | OrderStatus::Deactivated
        )
    }
}

/// Execution status of an order or fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecStatus {
    Init,
    New,
    Aborted,
    MakerFill,
    TakerFill,
    Expired,
    PendingNew,
    PendingCancel,
    PendingReplace,
    Canceled,
    CreateRejected,
}

/// Special execution instruction on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecInst {
    ReduceOnly,
    CloseOnTrigger,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_spellings_round_trip() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), r#""Buy""#);
        assert_eq!(
            serde_json::to_string(&TimeInForce::GoodTillCancel).unwrap(),
            r#""GoodTillCancel""#
        );
        assert_eq!(
            serde_json::to_string(&OrderType::BoSlMarket).unwrap(),
            r#""BoSlMarket""#
        );
        let side: Side = serde_json::from_str(r#""Sell""#).unwrap();
        assert_eq!(side, Side::Sell);
        let status: OrderStatus = serde_json::from_str(r#""PartiallyFilled""#).unwrap();
        assert_eq!(status, OrderStatus::PartiallyFilled);
    }

    #[test]
    fn conditional_types() {
        assert!(!OrderType::Limit.is_conditional());
        assert!(!OrderType::Market.is_conditional());
        assert!(!OrderType::MarketAsLimit.is_conditional());
        assert!(OrderType::Stop.is_conditional());
        assert!(OrderType::StopLimit.is_conditional());
        assert!(OrderType::LimitIfTouched.is_conditional());
        assert!(OrderType::Bracket.is_conditional());
    }

    #[test]
    fn terminal_statuses() {
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
        assert!(!OrderStatus::New.is_terminal());
        assert!(!OrderStatus::Untriggered.is_terminal());
    }

    #[test]
    fn side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }
}
