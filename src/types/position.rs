//! Account, position, and risk models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::products::ProductCatalog;

use super::decimal::PhemexDecimal;
use super::enums::{MarginMode, PosMode, PosSide, Side};
use super::scale::{self, AutoScale, ScaleDimension, ScaledField, ScaledValue};
use super::serde_helpers::none_markers;

/// Sub-account summary attached to position responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    /// User mode: Normal or Liquidation
    pub user_mode: Option<i64>,
    pub status: Option<i64>,
    pub currency: String,
    /// Total account balance including used margin
    #[serde(rename = "accountBalanceRv")]
    pub total_balance: PhemexDecimal,
    /// Balance currently used as margin for open positions and orders
    #[serde(rename = "totalUsedBalanceRv")]
    pub used_balance: PhemexDecimal,
    /// Bonus balance usable for trading but not withdrawable
    #[serde(rename = "bonusBalanceRv")]
    pub bonus_balance: PhemexDecimal,
}

impl Account {
    /// Balance free for new orders.
    pub fn available_balance(&self) -> PhemexDecimal {
        self.total_balance - self.used_balance
    }
}

impl AutoScale for Account {}

macro_rules! position_helpers {
    () => {
        /// Position size signed by direction: short positions are negative.
        pub fn signed_size(&self) -> PhemexDecimal {
            if self.pos_side == PosSide::Short {
                -self.size.abs()
            } else {
                self.size.abs()
            }
        }

        /// Cross vs isolated margin. The exchange encodes cross margin as a
        /// non-positive leverage ratio.
        pub fn margin_mode(&self) -> MarginMode {
            if self.leverage <= PhemexDecimal::ZERO {
                MarginMode::Cross
            } else {
                MarginMode::Isolated
            }
        }

        /// Leverage magnitude regardless of margin mode.
        pub fn effective_leverage(&self) -> PhemexDecimal {
            self.leverage.abs()
        }

        /// `1 / leverage`, or `None` at max leverage (cross with ratio 0).
        pub fn initial_margin_rate(&self) -> Option<PhemexDecimal> {
            let leverage = self.effective_leverage();
            if leverage.is_zero() {
                None
            } else {
                Some(PhemexDecimal::ONE / leverage)
            }
        }
    };
}

/// Open position as returned by the account-positions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(rename = "accountID")]
    pub account_id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    /// Execution sequence number
    pub exec_seq: i64,
    #[serde(rename = "positionStatus")]
    pub status: String,
    pub symbol: String,
    pub currency: String,
    #[serde(default, deserialize_with = "none_markers")]
    pub side: Option<Side>,
    pub pos_side: PosSide,
    pub pos_mode: PosMode,
    #[serde(rename = "transactTimeNs")]
    pub trans_time: i64,
    /// Position size in contracts
    pub size: PhemexDecimal,
    #[serde(rename = "assignedPosBalanceRv")]
    pub assigned_balance: PhemexDecimal,
    #[serde(rename = "usedBalanceRv")]
    pub used_balance: PhemexDecimal,
    /// Nominal value of the position
    #[serde(rename = "valueRv")]
    pub value: PhemexDecimal,
    /// Average entry price
    #[serde(rename = "avgEntryPriceRp")]
    pub entry_price: PhemexDecimal,
    #[serde(rename = "avgEntryPrice")]
    pub entry_price_alt: PhemexDecimal,
    /// Estimated bankruptcy price
    #[serde(rename = "bankruptPriceRp")]
    pub bankrupt_price: PhemexDecimal,
    /// Estimated liquidation price
    #[serde(rename = "liquidationPriceRp")]
    pub liquidation_price: PhemexDecimal,
    #[serde(rename = "markPriceRp")]
    pub mark_price: PhemexDecimal,
    /// Margin allocated to this position
    #[serde(rename = "positionMarginRv")]
    pub margin: PhemexDecimal,
    #[serde(rename = "initMarginReqRr")]
    pub initial_margin: PhemexDecimal,
    #[serde(rename = "maintMarginReqRr")]
    pub maintenance_margin: PhemexDecimal,
    pub cross_margin: Option<bool>,
    #[serde(rename = "cumClosedPnlRv")]
    pub cum_closed_pnl: PhemexDecimal,
    /// Realized PnL for the current settlement term
    #[serde(rename = "curTermRealisedPnlRv")]
    pub cur_realized_pnl: PhemexDecimal,
    #[serde(rename = "estimatedOrdLossRv")]
    pub estimated_loss: PhemexDecimal,
    /// Commission lost at bankruptcy
    #[serde(rename = "bankruptCommRv")]
    pub bankrupt_comm: PhemexDecimal,
    #[serde(rename = "buyValueToCostRr")]
    pub buy_to_cost: PhemexDecimal,
    #[serde(rename = "sellValueToCostRr")]
    pub sell_to_cost: PhemexDecimal,
    /// Cost basis of the position
    #[serde(rename = "posCostRv")]
    pub cost_basis: PhemexDecimal,
    /// ADL (auto-deleveraging) priority percentile
    #[serde(rename = "deleveragePercentileRr")]
    pub deleverage_percentile: PhemexDecimal,
    /// Leverage ratio; non-positive means cross margin
    #[serde(rename = "leverageRr")]
    pub leverage: PhemexDecimal,
    #[serde(rename = "riskLimitRv")]
    pub risk_limit: PhemexDecimal,
    /// Current settlement term index
    pub term: i64,
    #[serde(rename = "lastTermEndTimeNs")]
    pub last_term_end: i64,
    #[serde(rename = "lastFundingTimeNs")]
    pub last_funding: i64,
    #[serde(rename = "cumFundingFeeRv")]
    pub cum_funding_fee: PhemexDecimal,
    #[serde(rename = "cumTransactFeeRv")]
    pub cum_trans_fee: PhemexDecimal,
    #[serde(rename = "buyLeavesQtyRq")]
    pub buy_leaves_qty: PhemexDecimal,
    #[serde(rename = "buyLeavesValueRv")]
    pub buy_leaves_value: PhemexDecimal,
    #[serde(rename = "sellLeavesQtyRq")]
    pub sell_leaves_qty: PhemexDecimal,
    #[serde(rename = "sellLeavesValueRv")]
    pub sell_leaves_value: PhemexDecimal,
    #[serde(rename = "makerFeeRateRr")]
    pub maker_fee: PhemexDecimal,
    #[serde(rename = "takerFeeRateRr")]
    pub taker_fee: PhemexDecimal,
}

impl Position {
    position_helpers!();
}

impl AutoScale for Position {}

/// Open position with unrealized PnL, from the heavier positions endpoint.
///
/// This is the one response model that still carries legacy `Ev`/`Ep`
/// encoded fields; they are descaled on validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionWithPnl {
    #[serde(rename = "accountID")]
    pub account_id: i64,
    pub exec_seq: i64,
    #[serde(rename = "positionStatus")]
    pub status: String,
    pub symbol: String,
    pub currency: String,
    #[serde(default, deserialize_with = "none_markers")]
    pub side: Option<Side>,
    pub pos_side: PosSide,
    pub pos_mode: PosMode,
    #[serde(rename = "sizeRq")]
    pub size: PhemexDecimal,
    #[serde(rename = "assignedPosBalanceRv")]
    pub assigned_balance: PhemexDecimal,
    #[serde(rename = "usedBalanceRv")]
    pub used_balance: PhemexDecimal,
    #[serde(rename = "valueRv")]
    pub value: PhemexDecimal,
    #[serde(rename = "avgEntryPriceRp")]
    pub entry_price: PhemexDecimal,
    #[serde(rename = "bankruptPriceRp")]
    pub bankrupt_price: PhemexDecimal,
    #[serde(rename = "liquidationPriceRp")]
    pub liquidation_price: PhemexDecimal,
    #[serde(rename = "markPriceRp")]
    pub mark_price: PhemexDecimal,
    /// Mark value, wire `Ev` encoding (descaled on validation)
    #[serde(rename = "markValueEv")]
    pub mark_value: Option<PhemexDecimal>,
    /// Stop loss price, wire `Ep` encoding (descaled on validation)
    #[serde(rename = "stopLossEp")]
    pub sl_price: PhemexDecimal,
    /// Take profit price, wire `Ep` encoding (descaled on validation)
    #[serde(rename = "takeProfitEp")]
    pub tp_price: PhemexDecimal,
    #[serde(rename = "positionMarginRv")]
    pub margin: PhemexDecimal,
    #[serde(rename = "initMarginReqRr")]
    pub initial_margin: PhemexDecimal,
    #[serde(rename = "maintMarginReqRr")]
    pub maintenance_margin: PhemexDecimal,
    pub cross_margin: Option<bool>,
    #[serde(rename = "cumClosedPnlRv")]
    pub cum_closed_pnl: PhemexDecimal,
    #[serde(rename = "curTermRealisedPnlRv")]
    pub cur_realized_pnl: PhemexDecimal,
    #[serde(rename = "estimatedOrdLossRv")]
    pub estimated_loss: PhemexDecimal,
    #[serde(rename = "bankruptCommRv")]
    pub bankrupt_comm: PhemexDecimal,
    #[serde(rename = "buyValueToCostRr")]
    pub buy_to_cost: PhemexDecimal,
    #[serde(rename = "sellValueToCostRr")]
    pub sell_to_cost: PhemexDecimal,
    #[serde(rename = "posCostRv")]
    pub cost_basis: PhemexDecimal,
    #[serde(rename = "deleveragePercentileRr")]
    pub deleverage_percentile: PhemexDecimal,
    #[serde(rename = "leverageRr")]
    pub leverage: PhemexDecimal,
    #[serde(rename = "riskLimitRv")]
    pub risk_limit: PhemexDecimal,
    pub term: i64,
    #[serde(rename = "lastTermEndTimeNs")]
    pub last_term_end: i64,
    #[serde(rename = "lastFundingTimeNs")]
    pub last_funding: i64,
    #[serde(rename = "cumFundingFeeRv")]
    pub cum_funding_fee: PhemexDecimal,
    #[serde(rename = "cumTransactFeeRv")]
    pub cum_trans_fee: PhemexDecimal,
    /// Realized PnL, wire `Ev` encoding (descaled on validation)
    #[serde(rename = "realisedPnlEv")]
    pub realized_pnl: Option<PhemexDecimal>,
    /// Cumulative realized PnL, wire `Ev` encoding (descaled on validation)
    #[serde(rename = "cumRealisedPnlEv")]
    pub cum_realized_pnl: Option<PhemexDecimal>,
    /// Unrealized PnL at the mark price
    #[serde(rename = "unRealisedPnlRv")]
    pub unrealized_pnl: PhemexDecimal,
    /// Unrealized position loss, wire `Ev` encoding (descaled on validation)
    #[serde(rename = "unRealisedPosLossEv")]
    pub unrealized_loss: Option<PhemexDecimal>,
}

impl PositionWithPnl {
    position_helpers!();

    /// Equity tied to this position: margin plus unrealized PnL.
    pub fn equity(&self) -> PhemexDecimal {
        self.margin + self.unrealized_pnl
    }
}

impl AutoScale for PositionWithPnl {
    const SCALED_FIELDS: &'static [ScaledField<Self>] = &[
        ScaledField {
            field: "mark_value",
            alias: "markValueEv",
            dimension: ScaleDimension::Value,
            get: |m| m.mark_value.scaled(),
            get_mut: |m| m.mark_value.scaled_mut(),
        },
        ScaledField {
            field: "sl_price",
            alias: "stopLossEp",
            dimension: ScaleDimension::Price,
            get: |m| m.sl_price.scaled(),
            get_mut: |m| m.sl_price.scaled_mut(),
        },
        ScaledField {
            field: "tp_price",
            alias: "takeProfitEp",
            dimension: ScaleDimension::Price,
            get: |m| m.tp_price.scaled(),
            get_mut: |m| m.tp_price.scaled_mut(),
        },
        ScaledField {
            field: "realized_pnl",
            alias: "realisedPnlEv",
            dimension: ScaleDimension::Value,
            get: |m| m.realized_pnl.scaled(),
            get_mut: |m| m.realized_pnl.scaled_mut(),
        },
        ScaledField {
            field: "cum_realized_pnl",
            alias: "cumRealisedPnlEv",
            dimension: ScaleDimension::Value,
            get: |m| m.cum_realized_pnl.scaled(),
            get_mut: |m| m.cum_realized_pnl.scaled_mut(),
        },
        ScaledField {
            field: "unrealized_loss",
            alias: "unRealisedPosLossEv",
            dimension: ScaleDimension::Value,
            get: |m| m.unrealized_loss.scaled(),
            get_mut: |m| m.unrealized_loss.scaled_mut(),
        },
    ];

    fn symbol(&self) -> Option<&str> {
        Some(self.symbol.as_str())
    }
}

/// Payload of the account-positions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionResponse {
    pub account: Account,
    pub positions: Vec<Position>,
}

impl AutoScale for PositionResponse {}

/// Payload of the positions-with-PnL endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionsWithPnlResponse {
    pub account: Account,
    pub positions: Vec<PositionWithPnl>,
}

impl PositionsWithPnlResponse {
    /// Position with non-zero size for the symbol, if any.
    pub fn get(&self, symbol: &str) -> Option<&PositionWithPnl> {
        self.positions
            .iter()
            .find(|pos| pos.symbol == symbol && !pos.size.is_zero())
    }

    /// Total absolute notional exposure across all positions.
    pub fn exposure(&self) -> PhemexDecimal {
        PhemexDecimal::sum(self.positions.iter().map(|pos| pos.value))
    }

    /// Account equity. Safest is the exchange's own balance field.
    pub fn equity(&self) -> PhemexDecimal {
        self.account.total_balance
    }

    /// Available cash (free balance).
    pub fn cash(&self) -> PhemexDecimal {
        self.account.available_balance()
    }
}

impl AutoScale for PositionsWithPnlResponse {
    fn descale_nested(&mut self, catalog: &ProductCatalog) -> Result<()> {
        for position in &mut self.positions {
            scale::descale(position, catalog)?;
        }
        Ok(())
    }

    fn rescale_nested(&self, catalog: &ProductCatalog, out: &mut Map<String, Value>) -> Result<()> {
        let positions = self
            .positions
            .iter()
            .map(|position| scale::to_wire(position, catalog).map(Value::Object))
            .collect::<Result<Vec<_>>>()?;
        out.insert("positions".to_string(), Value::Array(positions));
        Ok(())
    }
}

/// Query for recently closed positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedPositionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(rename = "withCount", skip_serializing_if = "Option::is_none")]
    pub with_count: Option<bool>,
}

impl ClosedPositionRequest {
    pub fn recent(symbol: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            currency: Some(currency.into()),
            offset: Some(0),
            limit: Some(200),
            with_count: Some(false),
        }
    }
}

impl AutoScale for ClosedPositionRequest {}

/// A fully or partially closed position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedPosition {
    pub symbol: String,
    pub currency: String,
    /// Buy(1), Sell(2)
    pub side: i32,
    /// 1 when the position is completely closed
    pub finished: i32,
    #[serde(rename = "closedSizeRq")]
    pub closed_size: PhemexDecimal,
    #[serde(rename = "openedTimeNs")]
    pub open_time: i64,
    #[serde(rename = "updatedTimeNs")]
    pub updated_time: i64,
    pub open_price: PhemexDecimal,
    pub close_price: PhemexDecimal,
    #[serde(rename = "cumEntryValueRv")]
    pub cum_entry_value: Option<PhemexDecimal>,
    #[serde(rename = "closedPnlRv")]
    pub closed_pnl: PhemexDecimal,
    #[serde(rename = "realizedPnlRv")]
    pub realized_pnl: Option<PhemexDecimal>,
    /// Return on investment ratio
    pub roi: PhemexDecimal,
    pub leverage: PhemexDecimal,
    pub term: i64,
    #[serde(rename = "fundingFeeRv")]
    pub funding_fee: PhemexDecimal,
    #[serde(rename = "exchangeFeeRv")]
    pub exchange_fee: PhemexDecimal,
}

impl AutoScale for ClosedPosition {}

/// Margin/leverage usage summary of one risk unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskUnit {
    pub user_id: i64,
    pub symbol: String,
    /// Numeric code of the valuation currency
    #[serde(rename = "valuationCcy")]
    pub currency_code: i64,
    pub pos_side: PosSide,
    /// Account risk management mode (e.g., CrossAsset or Isolated)
    pub risk_mode: String,
    /// Total equity including unrealized PnL
    #[serde(rename = "totalEquityRv")]
    pub equity: PhemexDecimal,
    /// Balance locked by open orders
    #[serde(rename = "totalOrdUsedBalanceRv")]
    pub used_balance: PhemexDecimal,
    #[serde(rename = "totalBalanceRv")]
    pub total_balance: PhemexDecimal,
    #[serde(rename = "estAvailableBalanceRv")]
    pub estimated_balance: PhemexDecimal,
    #[serde(rename = "totalFreeRv")]
    pub free_balance: Option<PhemexDecimal>,
    #[serde(rename = "fixedUsedRv")]
    pub fixed_balance: PhemexDecimal,
    #[serde(rename = "marginRatioRr")]
    pub margin_ratio: PhemexDecimal,
    /// Total unrealized PnL across all open positions
    #[serde(rename = "totalPosUnpnlRv")]
    pub total_position_pnl: PhemexDecimal,
    #[serde(rename = "totalPosCostRv")]
    pub total_position_cost: PhemexDecimal,
    /// Total maintenance margin required for all open positions
    #[serde(rename = "totalPosMMRv")]
    pub total_position_mm: PhemexDecimal,
    #[serde(rename = "totalOrdOpenLossRv")]
    pub total_open_loss: PhemexDecimal,
}

impl AutoScale for RiskUnit {}

/// Request to switch position mode for a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchModeRequest {
    pub symbol: String,
    #[serde(rename = "targetPosMode")]
    pub mode: PosMode,
}

impl SwitchModeRequest {
    pub fn make(symbol: impl Into<String>, mode: PosMode) -> Self {
        Self {
            symbol: symbol.into(),
            mode,
        }
    }
}

impl AutoScale for SwitchModeRequest {}

/// Request to change leverage for a symbol.
///
/// Either `one_way` alone, or `long` and `short` together; negative values
/// select cross margin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetLeverageRequest {
    pub symbol: String,
    /// Leverage for one-way mode
    #[serde(rename = "leverageRr", skip_serializing_if = "Option::is_none")]
    pub one_way: Option<PhemexDecimal>,
    /// Leverage for long positions (hedged mode)
    #[serde(rename = "longLeverageRr", skip_serializing_if = "Option::is_none")]
    pub long: Option<PhemexDecimal>,
    /// Leverage for short positions (hedged mode)
    #[serde(rename = "shortLeverageRr", skip_serializing_if = "Option::is_none")]
    pub short: Option<PhemexDecimal>,
}

impl SetLeverageRequest {
    /// Same leverage for both sides in hedged mode.
    pub fn hedged(symbol: impl Into<String>, leverage: PhemexDecimal) -> Self {
        Self {
            symbol: symbol.into(),
            one_way: None,
            long: Some(leverage),
            short: Some(leverage),
        }
    }

    /// Leverage for one-way mode.
    pub fn one_way(symbol: impl Into<String>, leverage: PhemexDecimal) -> Self {
        Self {
            symbol: symbol.into(),
            one_way: Some(leverage),
            long: None,
            short: None,
        }
    }

    /// Build a leverage change that also selects the margin mode: cross
    /// margin is requested by sending the leverage negated.
    pub fn with_margin_mode(
        symbol: impl Into<String>,
        leverage: PhemexDecimal,
        margin_mode: MarginMode,
        hedged: bool,
    ) -> Self {
        let signed = match margin_mode {
            MarginMode::Cross => -leverage.abs(),
            MarginMode::Isolated => leverage.abs(),
        };
        if hedged {
            Self::hedged(symbol, signed)
        } else {
            Self::one_way(symbol, signed)
        }
    }

    /// Hedged mode requires long and short together; one-way excludes both.
    pub fn validate(&self) -> Result<()> {
        if self.one_way.is_some() {
            if self.long.is_some() || self.short.is_some() {
                return Err(Error::Validation(
                    "provide either one-way leverage or long + short leverage, not both"
                        .to_string(),
                ));
            }
            return Ok(());
        }
        match (self.long.is_some(), self.short.is_some()) {
            (true, true) => Ok(()),
            (false, false) => Err(Error::Validation(
                "must provide one-way leverage or long + short leverage".to_string(),
            )),
            _ => Err(Error::Validation(
                "both long and short leverage must be provided in hedged mode".to_string(),
            )),
        }
    }
}

impl AutoScale for SetLeverageRequest {}

/// Request to assign margin balance to an isolated position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPositionBalanceRequest {
    pub symbol: String,
    pub pos_side: PosSide,
    #[serde(rename = "posBalanceRv")]
    pub amount: PhemexDecimal,
}

impl AssignPositionBalanceRequest {
    /// Assign balance to an existing position. Cross-margin positions have
    /// no assignable balance and are rejected here rather than server-side.
    pub fn for_position(position: &PositionWithPnl, amount: PhemexDecimal) -> Result<Self> {
        if position.margin_mode() == MarginMode::Cross {
            return Err(Error::Validation(format!(
                "cannot assign balance to {} in Cross margin mode",
                position.symbol
            )));
        }
        Ok(Self {
            symbol: position.symbol.clone(),
            pos_side: position.pos_side,
            amount,
        })
    }
}

impl AutoScale for AssignPositionBalanceRequest {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::SymbolScales;
    use serde_json::json;

    fn dec(s: &str) -> PhemexDecimal {
        s.parse().unwrap()
    }

    fn catalog() -> ProductCatalog {
        ProductCatalog::from_entries([(
            "BTCUSDT",
            SymbolScales {
                price_scale: 4,
                value_scale: 8,
                ratio_scale: 8,
            },
        )])
    }

    fn position_json(symbol: &str) -> Value {
        json!({
            "accountID": 9_867_420_003_i64,
            "execSeq": 512,
            "positionStatus": "Normal",
            "symbol": symbol,
            "currency": "USDT",
            "side": "Buy",
            "posSide": "Long",
            "posMode": "Hedged",
            "sizeRq": "0.5",
            "assignedPosBalanceRv": "0",
            "usedBalanceRv": "1000",
            "valueRv": "25000",
            "avgEntryPriceRp": "50000",
            "bankruptPriceRp": "45000",
            "liquidationPriceRp": "45500",
            "markPriceRp": "51000",
            "markValueEv": "2550000000000",
            "stopLossEp": "450000000",
            "takeProfitEp": "600000000",
            "positionMarginRv": "2500",
            "initMarginReqRr": "0.1",
            "maintMarginReqRr": "0.005",
            "cumClosedPnlRv": "0",
            "curTermRealisedPnlRv": "0",
            "estimatedOrdLossRv": "0",
            "bankruptCommRv": "0",
            "buyValueToCostRr": "0.1",
            "sellValueToCostRr": "0.1",
            "posCostRv": "2500",
            "deleveragePercentileRr": "0.2",
            "leverageRr": "10",
            "riskLimitRv": "1000000",
            "term": 1,
            "lastTermEndTimeNs": 0,
            "lastFundingTimeNs": 0,
            "cumFundingFeeRv": "0",
            "cumTransactFeeRv": "1.25",
            "realisedPnlEv": "-12500000",
            "unRealisedPnlRv": "500"
        })
    }

    fn account_json() -> Value {
        json!({
            "accountId": 9_867_420_003_i64,
            "userID": 986_742,
            "currency": "USDT",
            "accountBalanceRv": "10000",
            "totalUsedBalanceRv": "2500",
            "bonusBalanceRv": "0"
        })
    }

    #[test]
    fn position_with_pnl_descales_legacy_fields() {
        let pos: PositionWithPnl =
            scale::validate(position_json("BTCUSDT"), &catalog()).unwrap();
        assert_eq!(pos.mark_value.unwrap(), dec("25500"));
        assert_eq!(pos.sl_price, dec("45000"));
        assert_eq!(pos.tp_price, dec("60000"));
        assert_eq!(pos.realized_pnl.unwrap(), dec("-0.125"));
        // Plain Rv fields pass through untouched.
        assert_eq!(pos.unrealized_pnl, dec("500"));
        assert_eq!(pos.mark_price, dec("51000"));
    }

    #[test]
    fn position_with_pnl_serializes_back_idempotently() {
        let cat = catalog();
        let pos: PositionWithPnl = scale::validate(position_json("BTCUSDT"), &cat).unwrap();
        let first = scale::to_wire(&pos, &cat).unwrap();
        assert_eq!(first["markValueEv"], json!("2550000000000"));
        assert_eq!(first["stopLossEp"], json!("450000000"));
        assert_eq!(first["takeProfitEp"], json!("600000000"));
        assert_eq!(first["realisedPnlEv"], json!("-12500000"));
        let second = scale::to_wire(&pos, &cat).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_symbol_position_fails() {
        let err =
            scale::validate::<PositionWithPnl>(position_json("DOGEUSD"), &catalog()).unwrap_err();
        assert!(matches!(err, Error::ScaleResolution { .. }));
    }

    #[test]
    fn response_recurses_and_aggregates() {
        let resp: PositionsWithPnlResponse = scale::validate(
            json!({"account": account_json(), "positions": [position_json("BTCUSDT")]}),
            &catalog(),
        )
        .unwrap();
        assert_eq!(resp.positions[0].mark_value.unwrap(), dec("25500"));
        assert!(resp.get("BTCUSDT").is_some());
        assert!(resp.get("ETHUSDT").is_none());
        assert_eq!(resp.exposure(), dec("25000"));
        assert_eq!(resp.equity(), dec("10000"));
        assert_eq!(resp.cash(), dec("7500"));
    }

    #[test]
    fn equity_is_margin_plus_unrealized() {
        let pos: PositionWithPnl =
            scale::validate(position_json("BTCUSDT"), &catalog()).unwrap();
        assert_eq!(pos.equity(), dec("3000"));
    }

    #[test]
    fn signed_size_follows_position_side() {
        let mut pos: PositionWithPnl =
            scale::validate(position_json("BTCUSDT"), &catalog()).unwrap();
        assert_eq!(pos.signed_size(), dec("0.5"));
        pos.pos_side = PosSide::Short;
        assert_eq!(pos.signed_size(), dec("-0.5"));
        pos.size = PhemexDecimal::ZERO;
        assert_eq!(pos.signed_size(), PhemexDecimal::ZERO);
    }

    #[test]
    fn margin_mode_from_leverage_sign() {
        let mut pos: PositionWithPnl =
            scale::validate(position_json("BTCUSDT"), &catalog()).unwrap();
        assert_eq!(pos.margin_mode(), MarginMode::Isolated);
        assert_eq!(pos.effective_leverage(), dec("10"));
        assert_eq!(pos.initial_margin_rate().unwrap(), dec("0.1"));

        pos.leverage = dec("-10");
        assert_eq!(pos.margin_mode(), MarginMode::Cross);
        assert_eq!(pos.effective_leverage(), dec("10"));

        pos.leverage = PhemexDecimal::ZERO;
        assert_eq!(pos.margin_mode(), MarginMode::Cross);
        assert!(pos.initial_margin_rate().is_none());
    }

    #[test]
    fn account_available_balance() {
        let account: Account = serde_json::from_value(account_json()).unwrap();
        assert_eq!(account.available_balance(), dec("7500"));
    }

    #[test]
    fn leverage_single_sided_rejected() {
        // The hedged-mode contract: long and short together, or neither.
        let long_only = SetLeverageRequest {
            symbol: "BTCUSDT".to_string(),
            one_way: None,
            long: Some(dec("10")),
            short: None,
        };
        assert!(long_only.validate().is_err());

        let short_only = SetLeverageRequest {
            symbol: "BTCUSDT".to_string(),
            one_way: None,
            long: None,
            short: Some(dec("10")),
        };
        assert!(short_only.validate().is_err());
    }

    #[test]
    fn leverage_valid_shapes_accepted() {
        assert!(SetLeverageRequest::hedged("BTCUSDT", dec("10"))
            .validate()
            .is_ok());
        assert!(SetLeverageRequest::one_way("BTCUSDT", dec("5"))
            .validate()
            .is_ok());
    }

    #[test]
    fn leverage_one_way_excludes_sides() {
        let mixed = SetLeverageRequest {
            symbol: "BTCUSDT".to_string(),
            one_way: Some(dec("5")),
            long: Some(dec("10")),
            short: None,
        };
        assert!(mixed.validate().is_err());
    }

    #[test]
    fn leverage_nothing_provided_rejected() {
        let empty = SetLeverageRequest {
            symbol: "BTCUSDT".to_string(),
            one_way: None,
            long: None,
            short: None,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn with_margin_mode_signs_leverage() {
        let isolated =
            SetLeverageRequest::with_margin_mode("BTCUSDT", dec("10"), MarginMode::Isolated, true);
        assert_eq!(isolated.long.unwrap(), dec("10"));
        assert_eq!(isolated.short.unwrap(), dec("10"));

        let cross =
            SetLeverageRequest::with_margin_mode("BTCUSDT", dec("10"), MarginMode::Cross, true);
        assert_eq!(cross.long.unwrap(), dec("-10"));
        assert_eq!(cross.short.unwrap(), dec("-10"));

        let zero =
            SetLeverageRequest::with_margin_mode("BTCUSDT", dec("0"), MarginMode::Cross, true);
        assert_eq!(zero.long.unwrap(), PhemexDecimal::ZERO);

        let one_way =
            SetLeverageRequest::with_margin_mode("BTCUSDT", dec("5"), MarginMode::Cross, false);
        assert_eq!(one_way.one_way.unwrap(), dec("-5"));
        assert!(one_way.long.is_none());
        assert!(one_way.short.is_none());
    }

    #[test]
    fn assign_balance_rejects_cross_positions() {
        let mut pos: PositionWithPnl =
            scale::validate(position_json("BTCUSDT"), &catalog()).unwrap();
        let req = AssignPositionBalanceRequest::for_position(&pos, dec("100")).unwrap();
        assert_eq!(req.symbol, "BTCUSDT");
        assert_eq!(req.pos_side, PosSide::Long);
        assert_eq!(req.amount, dec("100"));

        pos.leverage = dec("-10");
        let err = AssignPositionBalanceRequest::for_position(&pos, dec("100")).unwrap_err();
        assert!(err.to_string().contains("Cross margin mode"));
    }

    #[test]
    fn switch_mode_make() {
        let req = SwitchModeRequest::make("BTCUSDT", PosMode::OneWay);
        assert_eq!(req.symbol, "BTCUSDT");
        assert_eq!(req.mode, PosMode::OneWay);
        let out = scale::to_wire(&req, &catalog()).unwrap();
        assert_eq!(out["targetPosMode"], json!("OneWay"));
    }
}
