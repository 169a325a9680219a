use {
    bigdecimal::BigDecimal,
    num::{BigInt, BigRational},
    std::cmp::Ordering,
};

/// Exact conversion of a decimal into a ratio of integers, used wherever
/// decimals have to take part in divisions that must not round.
pub fn big_decimal_to_big_rational(value: &BigDecimal) -> BigRational {
    let (numer, exponent) = value.as_bigint_and_exponent();
    let power = |e: i64| BigInt::from(10u8).pow(u32::try_from(e.unsigned_abs()).unwrap_or(u32::MAX));
    match exponent.cmp(&0) {
        Ordering::Equal => BigRational::from_integer(numer),
        Ordering::Greater => BigRational::new(numer, power(exponent)),
        Ordering::Less => BigRational::from_integer(numer * power(exponent)),
    }
}
