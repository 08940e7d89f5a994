//! Conversions between the integer, float, and decimal domains.
//!
//! The growth model works in `f64`; agent state stores integers and money
//! is a [`Decimal`]. Every lossy cast in the crate goes through here so the
//! saturation rules live in one place.

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::error::AgentError;

/// Widen a counter to `f64`. Values above 2^53 lose precision.
#[allow(clippy::cast_precision_loss)]
pub const fn to_f64(value: u64) -> f64 {
    value as f64
}

/// Round to the nearest integer and saturate into `u64`. NaN maps to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_to_u64(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.round() as u64
}

/// Round to the nearest integer and clamp into `[min, max]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_clamped_u8(value: f64, min: u8, max: u8) -> u8 {
    if value.is_nan() {
        return min;
    }
    let clamped = value.round().clamp(f64::from(min), f64::from(max));
    clamped as u8
}

/// Fail with [`AgentError::NonFinite`] unless `value` is finite.
pub fn finite(value: f64, context: &str) -> Result<f64, AgentError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AgentError::NonFinite {
            context: String::from(context),
        })
    }
}

/// Convert a finite float into money rounded to cents.
pub fn to_money(value: f64, context: &str) -> Result<Decimal, AgentError> {
    let value = finite(value, context)?;
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| AgentError::ArithmeticOverflow {
            context: String::from(context),
        })
}

/// Approximate a money amount as `f64`. Unrepresentable values map to 0.
pub fn money_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// `value` scaled by a factor, rounded to cents, saturating on overflow.
pub fn scale_money(value: Decimal, factor: f64) -> Decimal {
    Decimal::from_f64(factor)
        .and_then(|f| value.checked_mul(f))
        .map_or(Decimal::ZERO, |d| d.round_dp(2))
}

/// Bernoulli draw with `p` clamped into `[0, 1]`; NaN never fires.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    rng.random_bool(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_u64_saturates_negatives_and_nan() {
        assert_eq!(round_to_u64(-4.2), 0);
        assert_eq!(round_to_u64(f64::NAN), 0);
        assert_eq!(round_to_u64(10.6), 11);
    }

    #[test]
    fn round_clamped_u8_respects_bounds() {
        assert_eq!(round_clamped_u8(120.0, 0, 100), 100);
        assert_eq!(round_clamped_u8(-3.0, 0, 100), 0);
        assert_eq!(round_clamped_u8(64.4, 0, 100), 64);
    }

    #[test]
    fn finite_rejects_infinity() {
        assert!(finite(f64::INFINITY, "test").is_err());
        assert!(finite(1.0, "test").is_ok());
    }

    #[test]
    fn to_money_rounds_to_cents() {
        let money = to_money(12.345_6, "test");
        assert!(matches!(money, Ok(d) if d == Decimal::new(1235, 2)));
    }

    #[test]
    fn chance_clamps_out_of_range_probabilities() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        assert!(chance(&mut rng, 4.0));
        assert!(!chance(&mut rng, -1.0));
        assert!(!chance(&mut rng, f64::NAN));
    }

    #[test]
    fn scale_money_multiplies() {
        assert_eq!(scale_money(Decimal::new(10_000, 2), 0.3), Decimal::new(3_000, 2));
    }
}
