//! The scaled-field engine.
//!
//! Phemex transmits `Ep`/`Ev`/`Er` suffixed fields as scaled integers: the
//! wire value is the human value times `10^k`, where `k` is the instrument's
//! scale factor for the field's dimension. Models declare which of their
//! fields are scaled through a per-type table; [`descale`] converts wire
//! values to human values during validation, and [`to_wire`] converts them
//! back during serialization.
//!
//! The conversion is strict: a scaled field on an instance whose symbol the
//! catalog does not know is always an error, never a silent pass-through.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::products::ProductCatalog;

use super::decimal::PhemexDecimal;

/// The scale dimension a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleDimension {
    /// Prices (`Ep` fields), keyed by `priceScale`
    Price,
    /// Notional values (`Ev` fields), keyed by `valueScale`
    Value,
    /// Rates and ratios (`Er` fields), keyed by `ratioScale`
    Ratio,
}

impl ScaleDimension {
    /// The catalog key this dimension reads its factor from.
    pub fn key(&self) -> &'static str {
        match self {
            ScaleDimension::Price => "priceScale",
            ScaleDimension::Value => "valueScale",
            ScaleDimension::Ratio => "ratioScale",
        }
    }
}

/// One scaled-field declaration in a model's table.
pub struct ScaledField<T> {
    /// Rust field name, for diagnostics
    pub field: &'static str,
    /// Wire alias the field serializes under
    pub alias: &'static str,
    pub dimension: ScaleDimension,
    pub get: fn(&T) -> Option<&PhemexDecimal>,
    pub get_mut: fn(&mut T) -> Option<&mut PhemexDecimal>,
}

/// Uniform access to required and optional decimal fields, so one table
/// shape covers both `PhemexDecimal` and `Option<PhemexDecimal>`.
pub trait ScaledValue {
    fn scaled(&self) -> Option<&PhemexDecimal>;
    fn scaled_mut(&mut self) -> Option<&mut PhemexDecimal>;
}

impl ScaledValue for PhemexDecimal {
    fn scaled(&self) -> Option<&PhemexDecimal> {
        Some(self)
    }

    fn scaled_mut(&mut self) -> Option<&mut PhemexDecimal> {
        Some(self)
    }
}

impl ScaledValue for Option<PhemexDecimal> {
    fn scaled(&self) -> Option<&PhemexDecimal> {
        self.as_ref()
    }

    fn scaled_mut(&mut self) -> Option<&mut PhemexDecimal> {
        self.as_mut()
    }
}

/// Declares a model's scaled fields and how to resolve its instrument.
///
/// The table is built once per type at declaration time; per-instance work
/// is a direct walk over a fixed, usually empty, list. Models without
/// scaled fields implement this with an empty body.
pub trait AutoScale: Sized + 'static {
    /// Declaration-time table of scaled fields.
    const SCALED_FIELDS: &'static [ScaledField<Self>] = &[];

    /// Instrument symbol governing scale lookups for this instance.
    fn symbol(&self) -> Option<&str> {
        None
    }

    /// Descale nested models that carry scaled fields of their own.
    fn descale_nested(&mut self, catalog: &ProductCatalog) -> Result<()> {
        let _ = catalog;
        Ok(())
    }

    /// Re-serialize nested models into the wire map.
    fn rescale_nested(&self, catalog: &ProductCatalog, out: &mut Map<String, Value>) -> Result<()> {
        let _ = (catalog, out);
        Ok(())
    }
}

fn resolve_scale<T: AutoScale>(
    symbol: Option<&str>,
    field: &ScaledField<T>,
    value: &PhemexDecimal,
    catalog: &ProductCatalog,
) -> Result<u32> {
    symbol
        .and_then(|s| catalog.scales(s))
        .map(|scales| scales.get(field.dimension))
        .ok_or_else(|| Error::ScaleResolution {
            field: field.field,
            value: value.to_canonical_string(),
            symbol: symbol.map(str::to_owned),
            dimension: field.dimension.key(),
            available: catalog.symbols().map(str::to_owned).collect(),
        })
}

/// Wire -> human: replace each annotated, present field with its descaled
/// value (`wire * 10^-k`, normalized).
///
/// This is the one mutation an instance ever sees, performed while it is
/// still the transient output of deserialization; after [`validate`]
/// returns, the model is never touched again.
pub fn descale<T: AutoScale>(model: &mut T, catalog: &ProductCatalog) -> Result<()> {
    if !T::SCALED_FIELDS.is_empty() {
        let symbol = model.symbol().map(str::to_owned);
        for field in T::SCALED_FIELDS {
            let Some(current) = (field.get)(model).copied() else {
                continue;
            };
            let scale = resolve_scale(symbol.as_deref(), field, &current, catalog)?;
            if let Some(slot) = (field.get_mut)(model) {
                *slot = current.mul_pow10(-(scale as i32)).normalize();
            }
        }
    }
    model.descale_nested(catalog)
}

/// Parse a wire JSON value into a fully descaled model.
pub fn validate<T>(value: Value, catalog: &ProductCatalog) -> Result<T>
where
    T: DeserializeOwned + AutoScale,
{
    let mut model: T = serde_json::from_value(value)?;
    descale(&mut model, catalog)?;
    Ok(model)
}

/// Human -> wire: serialize the model, then overwrite each annotated,
/// present field's aliased entry with the rescaled canonical string
/// (`human * 10^k`).
///
/// The model itself is never mutated, so dumping the same instance any
/// number of times yields identical output with no scale compounding.
pub fn to_wire<T>(model: &T, catalog: &ProductCatalog) -> Result<Map<String, Value>>
where
    T: Serialize + AutoScale,
{
    let value = serde_json::to_value(model)?;
    let Value::Object(mut out) = value else {
        return Err(Error::Validation(
            "model did not serialize to a JSON object".to_string(),
        ));
    };

    for field in T::SCALED_FIELDS {
        let Some(current) = (field.get)(model) else {
            continue;
        };
        let scale = resolve_scale(model.symbol(), field, current, catalog)?;
        if out.contains_key(field.alias) {
            let rescaled = current.mul_pow10(scale as i32).normalize();
            out.insert(
                field.alias.to_string(),
                Value::String(rescaled.to_canonical_string()),
            );
        }
    }

    model.rescale_nested(catalog, &mut out)?;
    Ok(out)
}
