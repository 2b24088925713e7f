use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{BarViewError, BarViewResult};

/// Converts a decimal key, rejecting values `f64` cannot carry.
pub fn decimal_key(value: Decimal) -> BarViewResult<f64> {
    value
        .to_f64()
        .filter(|key| key.is_finite())
        .ok_or_else(|| BarViewError::InvalidData(format!("decimal key {value} does not fit in f64")))
}

/// Unix seconds with sub-second precision kept to microseconds.
#[must_use]
pub fn datetime_key(time: DateTime<Utc>) -> f64 {
    time.timestamp() as f64 + f64::from(time.timestamp_subsec_micros()) / 1_000_000.0
}

/// Folds `-0.0` into `0.0` so numerically equal keys compare equal under
/// `total_cmp`.
#[must_use]
pub(crate) fn canonical_key(key: f64) -> f64 {
    key + 0.0
}
