//! Models for the product information endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::products::ProductCatalog;

use super::decimal::PhemexDecimal;
use super::scale::{self, AutoScale, ScaleDimension, ScaledField, ScaledValue};

/// Currency listed on the exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInfo {
    /// Symbol code of the currency (e.g., BTC, ETH)
    pub currency: String,
    /// Currency symbol used for display, often same as the main symbol
    pub display_currency: String,
    /// Full name of the currency (e.g., Bitcoin)
    pub name: String,
    /// Internal numeric code identifying the currency
    pub code: i64,
    /// Listing status of the currency (e.g., Listed, Delisted)
    pub status: String,
    /// Number of decimal places used for the currency's value scale
    pub value_scale: u32,
    /// Display and calculation precision for this asset
    pub assets_precision: u32,
    /// Minimum allowable value for transfers or balances, raw `Ev` units
    #[serde(rename = "minValueEv")]
    pub min_value: PhemexDecimal,
    /// Maximum allowable value for transfers or balances, raw `Ev` units
    #[serde(rename = "maxValueEv")]
    pub max_value: PhemexDecimal,
    /// Whether deposits/withdrawals require an address tag or memo
    pub need_addr_tag: i32,
    /// Whether this currency shows up in the assets list
    pub in_assets_display: i32,
    /// 1 when the currency backs perpetual contracts
    pub perpetual: i32,
    /// 1 when the currency is a stablecoin
    pub stable_coin: i32,
}

impl AutoScale for CurrencyInfo {}

/// Spot trading pair.
///
/// Spot symbols are not part of the futures catalog, so the raw `Ev`/`Er`
/// fields here stay in exchange units; the `*_alt` twins carry the
/// human-readable values the exchange provides alongside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotProduct {
    /// Trading symbol, e.g. sBTCUSDT
    pub symbol: String,
    /// Display-friendly representation of the pair (e.g., BTC / USDT)
    pub display_symbol: String,
    pub base_currency: String,
    /// Currency in which the pair is quoted
    pub quote_currency: String,
    /// Internal numeric code identifying the product
    pub code: i64,
    #[serde(rename = "type")]
    pub product_type: String,
    pub description: String,
    pub status: String,
    /// Timestamp (ms) when the pair was listed
    pub list_time: i64,
    pub price_scale: u32,
    pub ratio_scale: u32,
    #[serde(rename = "tipOrderQty")]
    pub tip_order_quantity: PhemexDecimal,
    pub price_precision: u32,
    #[serde(rename = "baseTickSizeEv")]
    pub base_tick_size: PhemexDecimal,
    #[serde(rename = "baseQtyPrecision")]
    pub base_quantity_precision: u32,
    #[serde(rename = "quoteTickSizeEv")]
    pub quote_tick_size: PhemexDecimal,
    #[serde(rename = "quoteQtyPrecision")]
    pub quote_quantity_precision: u32,
    #[serde(rename = "minOrderValueEv")]
    pub min_order_value: PhemexDecimal,
    #[serde(rename = "maxOrderValueEv")]
    pub max_order_value: PhemexDecimal,
    #[serde(rename = "maxBaseOrderSizeEv")]
    pub max_base_order_size: PhemexDecimal,
    #[serde(rename = "defaultMakerFeeEr")]
    pub default_maker_fee: PhemexDecimal,
    #[serde(rename = "defaultTakerFeeEr")]
    pub default_taker_fee: PhemexDecimal,
    /// Maximum buy price as a percentage above the reference price
    #[serde(rename = "buyPriceUpperLimitPct")]
    pub buy_upper_limit: PhemexDecimal,
    /// Lower limit for sell orders as a percentage below the reference
    #[serde(rename = "sellPriceLowerLimitPct")]
    pub sell_lower_limit: PhemexDecimal,
    #[serde(rename = "baseTickSize")]
    pub base_tick_size_alt: String,
    #[serde(rename = "quoteTickSize")]
    pub quote_tick_size_alt: String,
    #[serde(rename = "minOrderValue")]
    pub min_order_value_alt: String,
    #[serde(rename = "maxBaseOrderSize")]
    pub max_base_order_size_alt: String,
    #[serde(rename = "maxOrderValue")]
    pub max_order_value_alt: String,
    #[serde(rename = "defaultMakerFee")]
    pub default_maker_fee_alt: String,
    #[serde(rename = "defaultTakerFee")]
    pub default_taker_fee_alt: String,
}

impl AutoScale for SpotProduct {}

/// First-generation perpetual contract (coin-margined symbols like BTCUSD).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpetualProduct {
    /// Trading symbol, e.g. BTCUSD
    pub symbol: String,
    pub display_symbol: String,
    pub base_currency: String,
    pub quote_currency: String,
    pub code: i64,
    #[serde(rename = "type")]
    pub product_type: String,
    /// Contract description, including funding and settlement rules
    pub description: String,
    pub status: String,
    pub list_time: i64,
    pub price_scale: u32,
    pub ratio_scale: u32,
    #[serde(rename = "tipOrderQty")]
    pub tip_order_quantity: PhemexDecimal,
    /// Symbol representing the index price source for the contract
    pub index_symbol: String,
    /// Symbol representing the mark price index
    pub mark_symbol: String,
    #[serde(rename = "fundingRateSymbol")]
    pub funding_symbol: String,
    #[serde(rename = "fundingRate8hSymbol")]
    pub funding_symbol_8h: String,
    #[serde(rename = "contractUnderlyingAssets")]
    pub underlying_assets: String,
    pub settle_currency: String,
    pub major_symbol: bool,
    /// Minimum price increment between order prices
    pub tick_size: PhemexDecimal,
    /// Minimum order price, wire `Ep` encoding (descaled on validation)
    #[serde(rename = "minPriceEp")]
    pub min_price: PhemexDecimal,
    /// Maximum order price, wire `Ep` encoding (descaled on validation)
    #[serde(rename = "maxPriceEp")]
    pub max_price: PhemexDecimal,
    pub default_leverage: PhemexDecimal,
    /// Interval in seconds between funding payments
    pub funding_interval: i64,
    pub max_leverage: i64,
    /// Margin requirement factor associated with maximum leverage
    pub leverage_margin: PhemexDecimal,
    /// Maximum allowable open interest (-1 = unlimited)
    #[serde(rename = "maxOI")]
    pub max_oi: i64,
    /// Nominal value of one contract in quote currency units
    pub contract_size: PhemexDecimal,
    /// Minimum tradable quantity increment
    pub lot_size: PhemexDecimal,
    pub price_precision: u32,
    #[serde(rename = "maxOrderQty")]
    pub max_order_quantity: PhemexDecimal,
}

impl AutoScale for PerpetualProduct {
    const SCALED_FIELDS: &'static [ScaledField<Self>] = &[
        ScaledField {
            field: "min_price",
            alias: "minPriceEp",
            dimension: ScaleDimension::Price,
            get: |m| m.min_price.scaled(),
            get_mut: |m| m.min_price.scaled_mut(),
        },
        ScaledField {
            field: "max_price",
            alias: "maxPriceEp",
            dimension: ScaleDimension::Price,
            get: |m| m.max_price.scaled(),
            get_mut: |m| m.max_price.scaled_mut(),
        },
    ];

    fn symbol(&self) -> Option<&str> {
        Some(self.symbol.as_str())
    }
}

/// Second-generation USDT-margined perpetual contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpetualProductV2 {
    /// Trading symbol, e.g. BTCUSDT
    pub symbol: String,
    pub display_symbol: String,
    pub base_currency: String,
    pub quote_currency: String,
    pub code: i64,
    #[serde(rename = "type")]
    pub product_type: String,
    /// Subtype of the perpetual contract (e.g., Normal, Linear, Inverse)
    #[serde(rename = "perpetualProductSubType")]
    pub sub_type: String,
    pub description: String,
    pub status: String,
    pub list_time: i64,
    pub price_scale: u32,
    pub ratio_scale: u32,
    #[serde(rename = "tipOrderQty")]
    pub tip_order_quantity: PhemexDecimal,
    pub index_symbol: String,
    pub mark_symbol: String,
    #[serde(rename = "fundingRateSymbol")]
    pub funding_symbol: String,
    #[serde(rename = "fundingRate8hSymbol")]
    pub funding_symbol_8h: String,
    #[serde(rename = "contractUnderlyingAssets")]
    pub underlying_assets: String,
    pub settle_currency: String,
    pub major_symbol: bool,
    pub tick_size: PhemexDecimal,
    /// Minimum order price, wire `Ep` encoding (descaled on validation)
    #[serde(rename = "minPriceEp")]
    pub min_price: PhemexDecimal,
    /// Maximum order price, wire `Ep` encoding (descaled on validation)
    #[serde(rename = "maxPriceEp")]
    pub max_price: PhemexDecimal,
    pub default_leverage: PhemexDecimal,
    pub funding_interval: i64,
    pub max_leverage: i64,
    pub leverage_margin: PhemexDecimal,
    #[serde(rename = "maxOI")]
    pub max_oi: i64,
    pub price_precision: u32,
    #[serde(rename = "maxOrderQtyRq")]
    pub max_order_quantity: PhemexDecimal,
    #[serde(rename = "minOrderValueRq")]
    pub min_order_value: PhemexDecimal,
    pub quantity_precision: u32,
    #[serde(rename = "qtyStepSize")]
    pub quantity_step_size: PhemexDecimal,
    /// Maximum leverage allowed for open positions on this instrument
    #[serde(rename = "maxOpenPosLeverage")]
    pub max_open_leverage: PhemexDecimal,
}

impl AutoScale for PerpetualProductV2 {
    const SCALED_FIELDS: &'static [ScaledField<Self>] = &[
        ScaledField {
            field: "min_price",
            alias: "minPriceEp",
            dimension: ScaleDimension::Price,
            get: |m| m.min_price.scaled(),
            get_mut: |m| m.min_price.scaled_mut(),
        },
        ScaledField {
            field: "max_price",
            alias: "maxPriceEp",
            dimension: ScaleDimension::Price,
            get: |m| m.max_price.scaled(),
            get_mut: |m| m.max_price.scaled_mut(),
        },
    ];

    fn symbol(&self) -> Option<&str> {
        Some(self.symbol.as_str())
    }
}

/// Entry in the mixed v1 `products` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductEntry {
    Perpetual(PerpetualProduct),
    Spot(SpotProduct),
}

/// One risk limit tier of a v1 contract. No symbol of its own, so the raw
/// `Er` margin ratios stay in exchange units; the `*_alt` twins are the
/// human-readable values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLimitTier {
    /// Risk limit of this tier
    pub limit: i64,
    #[serde(rename = "initialMarginEr")]
    pub initial_margin: PhemexDecimal,
    #[serde(rename = "initialMargin")]
    pub initial_margin_alt: String,
    #[serde(rename = "maintenanceMarginEr")]
    pub maintenance_margin: PhemexDecimal,
    #[serde(rename = "maintenanceMargin")]
    pub maintenance_margin_alt: String,
}

impl AutoScale for RiskLimitTier {}

/// Risk limit ladder of a v1 contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRisk {
    pub symbol: String,
    /// Risk limit steps in exchange value units
    pub steps: String,
    #[serde(rename = "riskLimits")]
    pub risk_limits: Vec<RiskLimitTier>,
}

impl AutoScale for ProductRisk {}

/// Leverage options of a v1 contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLeverage {
    #[serde(rename = "initialMarginEr")]
    pub initial_margin: PhemexDecimal,
    #[serde(rename = "initialMargin")]
    pub initial_margin_alt: String,
    /// Available leverage multipliers
    pub options: Vec<PhemexDecimal>,
}

impl AutoScale for ProductLeverage {}

/// One risk limit tier of a v2 contract (`Rr` fields are real values).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLimitTierV2 {
    pub limit: PhemexDecimal,
    #[serde(rename = "initialMarginRr")]
    pub initial_margin: PhemexDecimal,
    #[serde(rename = "maintenanceMarginRr")]
    pub maintenance_margin: PhemexDecimal,
}

impl AutoScale for RiskLimitTierV2 {}

/// Risk limit ladder of a v2 contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRiskV2 {
    pub symbol: String,
    pub steps: String,
    #[serde(rename = "riskLimits")]
    pub risk_limits: Vec<RiskLimitTierV2>,
}

impl AutoScale for ProductRiskV2 {}

/// Leverage options of a v2 contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLeverageV2 {
    pub options: Vec<PhemexDecimal>,
    #[serde(rename = "initialMarginRr")]
    pub initial_margin: PhemexDecimal,
}

impl AutoScale for ProductLeverageV2 {}

/// One tier of a leverage margin group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeverageMarginTier {
    #[serde(rename = "notionalValueRv")]
    pub notional_value: PhemexDecimal,
    #[serde(rename = "maxLeverage")]
    pub max_leverage: PhemexDecimal,
    #[serde(rename = "maintenanceMarginRateRr")]
    pub maintenance_margin_rate: PhemexDecimal,
    #[serde(rename = "maintenanceAmountRv")]
    pub maintenance_amount: PhemexDecimal,
}

impl AutoScale for LeverageMarginTier {}

/// Leverage margin group, keyed by index id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeverageMargin {
    /// Identifier for the leverage margin group
    pub index: i64,
    pub items: Vec<LeverageMarginTier>,
}

impl AutoScale for LeverageMargin {}

/// Full payload of the product information endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub currencies: Vec<CurrencyInfo>,
    pub products: Vec<ProductEntry>,
    #[serde(rename = "riskLimits")]
    pub products_risk: Vec<ProductRisk>,
    #[serde(rename = "leverages")]
    pub products_leverage: Vec<ProductLeverage>,
    /// USDT-margined perpetual contracts
    #[serde(rename = "perpProductsV2")]
    pub futures: Vec<PerpetualProductV2>,
    #[serde(rename = "riskLimitsV2")]
    pub futures_risk: Vec<ProductRiskV2>,
    #[serde(rename = "leveragesV2")]
    pub futures_leverage: Vec<ProductLeverageV2>,
    #[serde(rename = "leverageMargins")]
    pub leverage_margins: Vec<LeverageMargin>,
    /// Exchange-wide ratio scale
    #[serde(rename = "ratioScale")]
    pub scale: u32,
    #[serde(rename = "perpProductsPilot")]
    pub pilot: Option<bool>,
    #[serde(rename = "md5Checksum")]
    pub checksum: String,
}

impl ProductResponse {
    /// Find a v2 perpetual by symbol.
    pub fn future(&self, symbol: &str) -> Option<&PerpetualProductV2> {
        self.futures.iter().find(|p| p.symbol == symbol)
    }
}

impl AutoScale for ProductResponse {
    fn descale_nested(&mut self, catalog: &ProductCatalog) -> Result<()> {
        for product in &mut self.products {
            if let ProductEntry::Perpetual(perp) = product {
                scale::descale(perp, catalog)?;
            }
        }
        for future in &mut self.futures {
            scale::descale(future, catalog)?;
        }
        Ok(())
    }

    fn rescale_nested(&self, catalog: &ProductCatalog, out: &mut Map<String, Value>) -> Result<()> {
        let products = self
            .products
            .iter()
            .map(|product| match product {
                ProductEntry::Perpetual(perp) => {
                    scale::to_wire(perp, catalog).map(Value::Object)
                }
                ProductEntry::Spot(spot) => scale::to_wire(spot, catalog).map(Value::Object),
            })
            .collect::<Result<Vec<_>>>()?;
        out.insert("products".to_string(), Value::Array(products));

        let futures = self
            .futures
            .iter()
            .map(|future| scale::to_wire(future, catalog).map(Value::Object))
            .collect::<Result<Vec<_>>>()?;
        out.insert("perpProductsV2".to_string(), Value::Array(futures));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::SymbolScales;
    use serde_json::json;

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

    fn v2_product_json() -> Value {
        json!({
            "symbol": "BTCUSDT",
            "displaySymbol": "BTC / USDT",
            "baseCurrency": "BTC",
            "quoteCurrency": "USDT",
            "code": 41541,
            "type": "PerpetualV2",
            "perpetualProductSubType": "Linear",
            "description": "BTC/USDT perpetual",
            "status": "Listed",
            "listTime": 1_575_158_400_000_i64,
            "priceScale": 4,
            "ratioScale": 8,
            "tipOrderQty": "0",
            "indexSymbol": ".BTCUSDT",
            "markSymbol": ".MBTCUSDT",
            "fundingRateSymbol": ".BTCUSDTFR",
            "fundingRate8hSymbol": ".BTCUSDTFR8H",
            "contractUnderlyingAssets": "BTC",
            "settleCurrency": "USDT",
            "majorSymbol": true,
            "tickSize": "0.1",
            "minPriceEp": "10000",
            "maxPriceEp": "20000000000",
            "defaultLeverage": "-10",
            "fundingInterval": 28800,
            "maxLeverage": 100,
            "leverageMargin": "1",
            "maxOI": -1,
            "pricePrecision": 2,
            "maxOrderQtyRq": "1000",
            "minOrderValueRq": "1",
            "quantityPrecision": 3,
            "qtyStepSize": "0.001",
            "maxOpenPosLeverage": "100"
        })
    }

    #[test]
    fn v2_product_descales_price_band() {
        let product: PerpetualProductV2 =
            scale::validate(v2_product_json(), &catalog()).unwrap();
        assert_eq!(product.min_price.to_canonical_string(), "1");
        assert_eq!(product.max_price.to_canonical_string(), "2000000");
        // Unannotated decimals stay as sent.
        assert_eq!(product.tick_size.to_canonical_string(), "0.1");
    }

    #[test]
    fn v2_product_round_trips_to_wire() {
        let cat = catalog();
        let product: PerpetualProductV2 = scale::validate(v2_product_json(), &cat).unwrap();
        let out = scale::to_wire(&product, &cat).unwrap();
        assert_eq!(out["minPriceEp"], json!("10000"));
        assert_eq!(out["maxPriceEp"], json!("20000000000"));
        // Twice gives the same answer; no compounding.
        assert_eq!(out, scale::to_wire(&product, &cat).unwrap());
    }

    #[test]
    fn product_response_recurses_into_futures() {
        let resp = json!({
            "currencies": [],
            "products": [],
            "riskLimits": [],
            "leverages": [],
            "perpProductsV2": [v2_product_json()],
            "riskLimitsV2": [],
            "leveragesV2": [],
            "leverageMargins": [],
            "ratioScale": 8,
            "md5Checksum": "abc123"
        });
        let response: ProductResponse = scale::validate(resp, &catalog()).unwrap();
        let btc = response.future("BTCUSDT").unwrap();
        assert_eq!(btc.min_price.to_canonical_string(), "1");
        assert!(response.future("ETHUSDT").is_none());
    }

    #[test]
    fn unknown_future_symbol_fails_validation() {
        let mut entry = v2_product_json();
        entry["symbol"] = json!("NOPEUSDT");
        let resp = json!({
            "currencies": [],
            "products": [],
            "riskLimits": [],
            "leverages": [],
            "perpProductsV2": [entry],
            "riskLimitsV2": [],
            "leveragesV2": [],
            "leverageMargins": [],
            "ratioScale": 8,
            "md5Checksum": "abc123"
        });
        let err = scale::validate::<ProductResponse>(resp, &catalog()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::ScaleResolution { .. }
        ));
    }
}
