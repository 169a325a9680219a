//! Bridges alloy's fixed width integers and `num` arbitrary precision types.

use {
    alloy::primitives::U256,
    anyhow::{Result, ensure},
    num::{BigInt, BigRational, BigUint, bigint::Sign},
};

pub trait U256Ext: Sized {
    fn to_big_uint(&self) -> BigUint;

    fn to_big_int(&self) -> BigInt {
        BigInt::from_biguint(Sign::Plus, self.to_big_uint())
    }

    fn to_big_rational(&self) -> BigRational {
        BigRational::from_integer(self.to_big_int())
    }

    /// Fails for negative values and values that need more than 256 bits.
    fn from_big_int(input: &BigInt) -> Result<Self>;
}

impl U256Ext for U256 {
    fn to_big_uint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_be_bytes::<32>())
    }

    fn from_big_int(input: &BigInt) -> Result<Self> {
        ensure!(input.sign() != Sign::Minus, "negative");
        let bytes = input.magnitude().to_bytes_be();
        ensure!(bytes.len() <= 32, "too large");
        Ok(U256::from_be_slice(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, num::Zero, std::str::FromStr};

    const MAX: &str =
        "115792089237316195423570985008687907853269984665640564039457584007913129639935";

    #[test]
    fn converts_to_big_int() {
        assert_eq!(U256::ZERO.to_big_int(), BigInt::zero());
        assert_eq!(U256::from(1337).to_big_int(), BigInt::from(1337));
        assert_eq!(U256::MAX.to_big_int(), BigInt::from_str(MAX).unwrap());
        assert_eq!(
            U256::from(7).to_big_rational(),
            BigRational::from_integer(7.into())
        );
    }

    #[test]
    fn converts_from_big_int() {
        for value in [0u64, 42, 1337] {
            assert_eq!(
                U256::from_big_int(&BigInt::from(value)).unwrap(),
                U256::from(value)
            );
        }
        let max = BigInt::from_str(MAX).unwrap();
        assert_eq!(U256::from_big_int(&max).unwrap(), U256::MAX);
        assert!(U256::from_big_int(&(max + 1)).is_err());
        assert!(U256::from_big_int(&BigInt::from(-1)).is_err());
    }
}
