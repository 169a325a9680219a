//! Constant product pricing along a route of one or two pools.

use {
    crate::error::Error,
    bigdecimal::BigDecimal,
    num::{BigInt, BigRational, Signed, Zero, rational::Ratio},
    number::{conversions::big_decimal_to_big_rational, units::truncate_significant},
};

/// The maximum number of hops a route may take.
pub const MAX_HOPS: usize = 2;

/// The number of significant digits quotes are truncated to unless
/// configured otherwise.
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 6;

/// Reserves of one constant product pool, oriented in trading direction and
/// normalized to decimals with each asset's own scale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiquidityPool {
    pub reserve_in: BigDecimal,
    pub reserve_out: BigDecimal,
}

impl LiquidityPool {
    pub fn new(reserve_in: BigDecimal, reserve_out: BigDecimal) -> Self {
        Self {
            reserve_in,
            reserve_out,
        }
    }

    fn is_tradable(&self) -> bool {
        self.reserve_in.is_positive() && self.reserve_out.is_positive()
    }

    /// `out = in * reserve_out / (reserve_in + in)` with the fee netted from
    /// the input first.
    fn amount_out(&self, amount_in: &BigRational, fee: Fee) -> BigRational {
        let amount_in = amount_in * fee.remainder();
        let reserve_in = big_decimal_to_big_rational(&self.reserve_in);
        let reserve_out = big_decimal_to_big_rational(&self.reserve_out);
        (&amount_in * reserve_out) / (reserve_in + amount_in)
    }
}

/// A path from an input asset to an output asset through zero or one
/// intermediate asset. Every pool of a route is tradable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route(Vec<LiquidityPool>);

impl Route {
    pub fn new(pools: Vec<LiquidityPool>) -> Result<Self, Error> {
        if pools.is_empty() || pools.len() > MAX_HOPS {
            return Err(Error::InvalidRoute(pools.len()));
        }
        if let Some(hop) = pools.iter().position(|pool| !pool.is_tradable()) {
            return Err(Error::IlliquidRoute { hop });
        }
        Ok(Self(pools))
    }

    pub fn single(pool: LiquidityPool) -> Result<Self, Error> {
        Self::new(vec![pool])
    }

    pub fn pools(&self) -> &[LiquidityPool] {
        &self.0
    }

    /// Exact output of routing `amount_in` through all hops, the output of a
    /// hop being the input of the next one.
    pub fn amount_out(&self, amount_in: &BigRational, fee: Fee) -> BigRational {
        self.0
            .iter()
            .fold(amount_in.clone(), |amount, pool| pool.amount_out(&amount, fee))
    }
}

/// Protocol fee charged on the input of every hop. Defaults to zero since
/// pool reserves are treated as already netted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fee(Ratio<u32>);

impl Fee {
    pub fn zero() -> Self {
        Self(Ratio::new_raw(0, 1))
    }

    pub fn from_bps(bps: u32) -> Result<Self, Error> {
        if bps >= 10_000 {
            return Err(Error::InvalidFee(bps));
        }
        Ok(Self(Ratio::new(bps, 10_000)))
    }

    /// `1 - fee`
    fn remainder(&self) -> BigRational {
        BigRational::new(
            BigInt::from(self.0.denom() - self.0.numer()),
            BigInt::from(*self.0.denom()),
        )
    }
}

impl Default for Fee {
    fn default() -> Self {
        Self::zero()
    }
}

/// Only exact input quoting is supported: the input amount is fixed and the
/// output amount is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TradeType {
    #[default]
    ExactInput,
}

/// Result of quoting a route. All values are truncated, never rounded up, to
/// the requested number of significant digits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    pub input_amount: BigDecimal,
    pub output_amount: BigDecimal,
    /// Price of the input asset denominated in the output asset.
    pub execution_price: BigDecimal,
    /// Price of the output asset denominated in the input asset. Computed
    /// from the exact result rather than by inverting `execution_price`.
    pub inverse_price: BigDecimal,
}

pub fn quote(
    route: &Route,
    input_amount: &BigDecimal,
    trade: TradeType,
    fee: Fee,
    significant_digits: u32,
) -> Result<Quote, Error> {
    let TradeType::ExactInput = trade;
    if significant_digits == 0 {
        return Err(Error::InvalidSignificantDigits(significant_digits));
    }
    if input_amount.is_negative() {
        return Err(number::InvalidAmount::Negative(input_amount.to_string()).into());
    }
    if input_amount.is_zero() {
        return Err(Error::ZeroAmount);
    }

    let amount_in = big_decimal_to_big_rational(input_amount);
    let amount_out = route.amount_out(&amount_in, fee);
    if amount_out.is_zero() {
        return Err(Error::ZeroAmount);
    }
    let execution_price = &amount_out / &amount_in;
    let inverse_price = &amount_in / &amount_out;

    Ok(Quote {
        input_amount: input_amount.clone(),
        output_amount: truncate_significant(&amount_out, significant_digits),
        execution_price: truncate_significant(&execution_price, significant_digits),
        inverse_price: truncate_significant(&inverse_price, significant_digits),
    })
}
