use {
    alloy::primitives::U256,
    bigdecimal::BigDecimal,
    number::units::{Scale, u256_to_decimal},
};

/// Base unit values of an auction round's internal liquidity tracking, as
/// they are returned by the auction contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawReserves {
    pub eth: U256,
    pub token: U256,
    pub last_price: U256,
    pub middle_price: U256,
}

/// Normalized reserves of one auction round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReserveSnapshot {
    pub eth_reserve: BigDecimal,
    pub asset_reserve: BigDecimal,
    /// Last traded price per native unit, `None` if no trade happened yet.
    pub last_price: Option<BigDecimal>,
    /// Rolling average price per native unit, `None` if no trade happened
    /// yet.
    pub rolling_average_price: Option<BigDecimal>,
}

impl ReserveSnapshot {
    pub fn normalize(raw: RawReserves) -> Self {
        let price = |value: U256| (!value.is_zero()).then(|| u256_to_decimal(value, Scale::ETHER));
        Self {
            eth_reserve: u256_to_decimal(raw.eth, Scale::ETHER),
            asset_reserve: u256_to_decimal(raw.token, Scale::ETHER),
            last_price: price(raw.last_price),
            rolling_average_price: price(raw.middle_price),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr};

    #[test]
    fn normalizes_all_fields() {
        let snapshot = ReserveSnapshot::normalize(RawReserves {
            eth: U256::from(1_500_000_000_000_000_000u64),
            token: U256::from(3_000_000_000_000_000_000_000u128),
            last_price: U256::from(2_000_000_000_000_000_000u64),
            middle_price: U256::from(1_999_000_000_000_000_000u64),
        });
        assert_eq!(snapshot.eth_reserve, BigDecimal::from_str("1.5").unwrap());
        assert_eq!(snapshot.asset_reserve, BigDecimal::from_str("3000").unwrap());
        assert_eq!(snapshot.last_price, Some(BigDecimal::from_str("2").unwrap()));
        assert_eq!(
            snapshot.rolling_average_price,
            Some(BigDecimal::from_str("1.999").unwrap())
        );
    }

    #[test]
    fn zero_prices_mean_no_trades_yet() {
        let snapshot = ReserveSnapshot::normalize(RawReserves::default());
        assert_eq!(snapshot.eth_reserve, BigDecimal::from(0));
        assert_eq!(snapshot.last_price, None);
        assert_eq!(snapshot.rolling_average_price, None);
    }
}
