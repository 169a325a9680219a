//! Fixed point normalization between on-chain base units and decimals.
//!
//! Contracts represent every amount as an integer of base units, where one
//! whole unit of an asset is `10^scale` base units. The helpers in here convert
//! between that representation and [`BigDecimal`] without ever going through
//! floating point.

use {
    crate::u256_ext::U256Ext,
    alloy::primitives::U256,
    bigdecimal::{BigDecimal, ToPrimitive},
    num::{BigInt, BigRational, Signed, Zero, bigint::Sign},
};

/// Number of fractional decimal digits an asset uses for its base units.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Scale(pub u8);

impl Scale {
    /// The scale used by the primary token, the staking ledger and the
    /// native asset.
    pub const ETHER: Self = Self(18);
    /// The scale used by the stable reference asset in price computations.
    pub const STABLE: Self = Self(6);
}

impl Default for Scale {
    fn default() -> Self {
        Self::ETHER
    }
}

/// A raw value that has no meaning as a monetary quantity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAmount {
    #[error("negative amount {0}")]
    Negative(String),
    #[error("amount {amount} has more than {scale} fractional digits")]
    ExcessPrecision { amount: String, scale: u8 },
    #[error("amount {0} does not fit into 256 bits")]
    Overflow(String),
}

/// Converts a base unit integer into a decimal with `scale` fractional digits.
pub fn to_decimal(raw: &BigInt, scale: Scale) -> Result<BigDecimal, InvalidAmount> {
    if raw.is_negative() {
        return Err(InvalidAmount::Negative(raw.to_string()));
    }
    Ok(BigDecimal::new(raw.clone(), i64::from(scale.0)))
}

/// Same as [`to_decimal`] for values read straight from a contract, these can
/// never be negative.
pub fn u256_to_decimal(raw: U256, scale: Scale) -> BigDecimal {
    BigDecimal::new(raw.to_big_int(), i64::from(scale.0))
}

/// Converts a decimal back into its base unit representation. This is the
/// exact inverse of [`to_decimal`], so values with more fractional digits than
/// the scale allows are rejected instead of being rounded.
pub fn to_raw(value: &BigDecimal, scale: Scale) -> Result<BigInt, InvalidAmount> {
    if value.is_negative() {
        return Err(InvalidAmount::Negative(value.to_string()));
    }
    let shifted = value * BigDecimal::new(BigInt::from(1), -i64::from(scale.0));
    let (int, exponent) = shifted.as_bigint_and_exponent();
    match exponent {
        0 => Ok(int),
        e if e < 0 => Ok(int * BigInt::from(10u8).pow(u32::try_from(-e).unwrap_or(u32::MAX))),
        e => {
            let factor = BigInt::from(10u8).pow(u32::try_from(e).unwrap_or(u32::MAX));
            if (&int % &factor).is_zero() {
                Ok(int / factor)
            } else {
                Err(InvalidAmount::ExcessPrecision {
                    amount: value.to_string(),
                    scale: scale.0,
                })
            }
        }
    }
}

/// Like [`to_raw`] but for amounts that have to be sent back as contract
/// arguments.
pub fn to_raw_u256(value: &BigDecimal, scale: Scale) -> Result<U256, InvalidAmount> {
    let raw = to_raw(value, scale)?;
    U256::from_big_int(&raw).map_err(|_| InvalidAmount::Overflow(raw.to_string()))
}

/// Truncates an exact non-negative ratio to `digits` significant digits. The
/// result never exceeds the input, so quoted prices are never overstated.
pub fn truncate_significant(value: &BigRational, digits: u32) -> BigDecimal {
    if value.is_zero() || digits == 0 {
        return BigDecimal::zero();
    }
    let numer = value.numer().abs();
    let denom = value.denom().abs();
    let magnitude = decimal_digits(&numer) - decimal_digits(&denom);

    // `numer / denom` lies in `(10^(magnitude - 1), 10^(magnitude + 1))` so the
    // scaled quotient has either `digits` or `digits + 1` digits.
    let mut scale = i64::from(digits) - magnitude;
    let mut quotient = scaled_quotient(&numer, &denom, scale);
    if decimal_digits(&quotient) > i64::from(digits) {
        quotient /= BigInt::from(10u8);
        scale -= 1;
    }
    if value.numer().sign() == Sign::Minus {
        quotient = -quotient;
    }
    BigDecimal::new(quotient, scale)
}

/// Narrows a decimal into an `f64` for consumers that explicitly ask for a
/// floating point representation. Precision may be lost here.
pub fn to_f64(value: &BigDecimal) -> Option<f64> {
    value.to_f64()
}

fn scaled_quotient(numer: &BigInt, denom: &BigInt, scale: i64) -> BigInt {
    let factor = BigInt::from(10u8).pow(u32::try_from(scale.unsigned_abs()).unwrap_or(u32::MAX));
    if scale >= 0 {
        numer * factor / denom
    } else {
        numer / (denom * factor)
    }
}

fn decimal_digits(value: &BigInt) -> i64 {
    if value.is_zero() {
        return 0;
    }
    i64::try_from(value.magnitude().to_str_radix(10).len()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr};

    fn raw(value: &str) -> BigInt {
        BigInt::from_str(value).unwrap()
    }

    fn decimal(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn normalizes_ether_amounts() {
        assert_eq!(
            to_decimal(&raw("1500000000000000000"), Scale::ETHER).unwrap(),
            decimal("1.5")
        );
        assert_eq!(to_decimal(&raw("0"), Scale::ETHER).unwrap(), decimal("0"));
        assert_eq!(
            to_decimal(&raw("1"), Scale::ETHER).unwrap(),
            decimal("0.000000000000000001")
        );
        assert_eq!(
            to_decimal(&raw("2500000"), Scale::STABLE).unwrap(),
            decimal("2.5")
        );
    }

    #[test]
    fn keeps_precision_beyond_f64() {
        // 2^53 + 1 is the first integer an f64 can't represent.
        let value = raw("9007199254740993000000000000000001");
        let normalized = to_decimal(&value, Scale::ETHER).unwrap();
        assert_eq!(normalized, decimal("9007199254740993.000000000000000001"));
        assert_eq!(to_raw(&normalized, Scale::ETHER).unwrap(), value);
    }

    #[test]
    fn only_f64_narrowing_loses_precision() {
        let value = raw("9007199254740993");
        let exact = to_decimal(&value, Scale(0)).unwrap();
        assert_eq!(to_raw(&exact, Scale(0)).unwrap(), value);

        let narrowed = to_f64(&exact).unwrap();
        assert_ne!(narrowed as u64, 9_007_199_254_740_993);
        assert_eq!(to_f64(&decimal("1.5")), Some(1.5));
    }

    #[test]
    fn rejects_negative_amounts() {
        assert_eq!(
            to_decimal(&raw("-1"), Scale::ETHER),
            Err(InvalidAmount::Negative("-1".to_string()))
        );
        assert!(matches!(
            to_raw(&decimal("-0.5"), Scale::ETHER),
            Err(InvalidAmount::Negative(_))
        ));
    }

    #[test]
    fn round_trips_raw_values() {
        for value in [
            "0",
            "1",
            "42",
            "1000000",
            "1500000000000000000",
            "123456789012345678901234567890",
            "115792089237316195423570985008687907853269984665640564039457584007913129639935",
        ] {
            for scale in [Scale(0), Scale::STABLE, Scale::ETHER, Scale(30)] {
                let value = raw(value);
                let decimal = to_decimal(&value, scale).unwrap();
                assert_eq!(to_raw(&decimal, scale).unwrap(), value, "scale {scale:?}");
            }
        }
    }

    #[test]
    fn to_raw_accepts_normalized_and_denormalized_decimals() {
        assert_eq!(to_raw(&decimal("1.5"), Scale::ETHER).unwrap(), raw("1500000000000000000"));
        assert_eq!(to_raw(&decimal("1.50000"), Scale::STABLE).unwrap(), raw("1500000"));
        assert_eq!(to_raw(&decimal("2e3"), Scale::STABLE).unwrap(), raw("2000000000"));
        assert!(matches!(
            to_raw(&decimal("0.0000001"), Scale::STABLE),
            Err(InvalidAmount::ExcessPrecision { scale: 6, .. })
        ));
    }

    #[test]
    fn u256_conversions() {
        assert_eq!(
            u256_to_decimal(U256::from(1_500_000_000_000_000_000u64), Scale::ETHER),
            decimal("1.5")
        );
        assert_eq!(
            to_raw_u256(&decimal("1.5"), Scale::ETHER).unwrap(),
            U256::from(1_500_000_000_000_000_000u64)
        );
        let too_large = BigDecimal::new(BigInt::from(2).pow(256), 0);
        assert!(matches!(
            to_raw_u256(&too_large, Scale(0)),
            Err(InvalidAmount::Overflow(_))
        ));
    }

    #[test]
    fn truncates_to_significant_digits() {
        let ratio = |n: i64, d: i64| BigRational::new(n.into(), d.into());
        assert_eq!(truncate_significant(&ratio(20_000, 1_010), 6), decimal("19.8019"));
        assert_eq!(truncate_significant(&ratio(2, 3), 6), decimal("0.666666"));
        assert_eq!(truncate_significant(&ratio(1, 1), 6), decimal("1"));
        assert_eq!(truncate_significant(&ratio(999_999_9, 10), 6), decimal("999999"));
        assert_eq!(truncate_significant(&ratio(123_456_789, 1), 3), decimal("123000000"));
        assert_eq!(truncate_significant(&ratio(1, 3_000_000), 2), decimal("0.00000033"));
        assert_eq!(truncate_significant(&ratio(0, 1), 6), decimal("0"));
    }

    #[test]
    fn truncation_never_rounds_up() {
        let almost_two = BigRational::new(
            BigInt::from_str("199999999999999999999999").unwrap(),
            BigInt::from_str("100000000000000000000000").unwrap(),
        );
        assert_eq!(truncate_significant(&almost_two, 6), decimal("1.99999"));
    }
}
