//! Per-instrument scale factors.
//!
//! Phemex encodes prices, values, and ratios as scaled integers; the scale
//! factors are per instrument and come from the product catalog. The catalog
//! ships with the crate as a processed JSON snapshot and is loaded exactly
//! once per process. See <https://phemex-docs.github.io/#price-ratio-value-scales>.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::scale::ScaleDimension;

static PRODUCTS_JSON: &str = include_str!("products.json");

static GLOBAL: LazyLock<ProductCatalog> =
    LazyLock::new(|| ProductCatalog::load().expect("bundled products.json is malformed"));

/// Scale factors for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SymbolScales {
    /// Exponent for the price dimension (`Ep` suffixed fields)
    #[serde(rename = "priceScale")]
    pub price_scale: u32,
    /// Exponent for the value dimension (`Ev` suffixed fields)
    #[serde(rename = "valueScale")]
    pub value_scale: u32,
    /// Exponent for the ratio dimension (`Er` suffixed fields)
    #[serde(rename = "ratioScale")]
    pub ratio_scale: u32,
}

impl SymbolScales {
    /// Scale factor for the given dimension.
    pub fn get(&self, dimension: ScaleDimension) -> u32 {
        match dimension {
            ScaleDimension::Price => self.price_scale,
            ScaleDimension::Value => self.value_scale,
            ScaleDimension::Ratio => self.ratio_scale,
        }
    }
}

/// Read-only snapshot of per-instrument scale metadata.
///
/// Immutable after load and shared by reference everywhere, so concurrent
/// reads need no synchronization.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCatalog {
    futures: BTreeMap<String, SymbolScales>,
}

impl ProductCatalog {
    /// Parse the bundled catalog snapshot.
    pub fn load() -> Result<Self> {
        serde_json::from_str(PRODUCTS_JSON).map_err(Error::CatalogLoad)
    }

    /// The process-wide catalog. Loaded on first use; a malformed bundle is
    /// a startup failure, not a per-request error.
    pub fn global() -> &'static ProductCatalog {
        &GLOBAL
    }

    /// Build a catalog from explicit entries (used by tests and by callers
    /// that maintain their own snapshot).
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, SymbolScales)>,
        S: Into<String>,
    {
        Self {
            futures: entries
                .into_iter()
                .map(|(symbol, scales)| (symbol.into(), scales))
                .collect(),
        }
    }

    /// Scale factors for a symbol, if the catalog knows it.
    pub fn scales(&self, symbol: &str) -> Option<&SymbolScales> {
        self.futures.get(symbol)
    }

    /// Whether the futures category lists the symbol.
    pub fn contains(&self, symbol: &str) -> bool {
        self.futures.contains_key(symbol)
    }

    /// All known symbols, in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.futures.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_loads() {
        let catalog = ProductCatalog::load().unwrap();
        let btc = catalog.scales("BTCUSDT").unwrap();
        assert_eq!(btc.price_scale, 4);
        assert_eq!(btc.value_scale, 8);
        assert_eq!(btc.ratio_scale, 8);
    }

    #[test]
    fn global_is_the_bundled_snapshot() {
        assert!(ProductCatalog::global().contains("ETHUSDT"));
        assert!(!ProductCatalog::global().contains("NOPEUSDT"));
    }

    #[test]
    fn dimension_lookup() {
        let scales = SymbolScales {
            price_scale: 4,
            value_scale: 8,
            ratio_scale: 8,
        };
        assert_eq!(scales.get(ScaleDimension::Price), 4);
        assert_eq!(scales.get(ScaleDimension::Value), 8);
        assert_eq!(scales.get(ScaleDimension::Ratio), 8);
    }

    #[test]
    fn from_entries_builds_custom_catalog() {
        let catalog = ProductCatalog::from_entries([(
            "BTCUSDT",
            SymbolScales {
                price_scale: 2,
                value_scale: 8,
                ratio_scale: 8,
            },
        )]);
        assert_eq!(catalog.scales("BTCUSDT").unwrap().price_scale, 2);
        assert_eq!(catalog.symbols().collect::<Vec<_>>(), vec!["BTCUSDT"]);
    }
}
