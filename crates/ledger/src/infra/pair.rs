use alloy::primitives::{Address, keccak256};

/// Two distinct tokens ordered by address, the way Uniswap V2 stores them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TokenPair(Address, Address);

impl TokenPair {
    /// Returns `None` if both tokens are the same.
    pub fn new(token_a: Address, token_b: Address) -> Option<Self> {
        match token_a.cmp(&token_b) {
            std::cmp::Ordering::Less => Some(Self(token_a, token_b)),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(Self(token_b, token_a)),
        }
    }

    /// The lower address is always first.
    pub fn get(&self) -> (Address, Address) {
        (self.0, self.1)
    }
}

/// Computes pool addresses of a Uniswap V2 style factory without any reads.
#[derive(Clone, Copy, Debug)]
pub struct PairProvider {
    pub factory: Address,
    pub init_code_digest: [u8; 32],
}

impl PairProvider {
    pub fn pair_address(&self, pair: &TokenPair) -> Address {
        let (token0, token1) = pair.get();

        // https://docs.uniswap.org/contracts/v2/guides/smart-contract-integration/getting-pair-addresses
        let salt = {
            let mut buffer = [0u8; 40];
            buffer[0..20].copy_from_slice(token0.as_slice());
            buffer[20..40].copy_from_slice(token1.as_slice());
            keccak256(buffer)
        };
        create2_target_address(self.factory, &salt, &self.init_code_digest)
    }
}

fn create2_target_address(
    creator: Address,
    salt: &[u8; 32],
    init_code_digest: &[u8; 32],
) -> Address {
    let mut preimage = [0xff; 85];
    preimage[1..21].copy_from_slice(creator.as_slice());
    preimage[21..53].copy_from_slice(salt);
    preimage[53..85].copy_from_slice(init_code_digest);
    Address::from_slice(&keccak256(preimage)[12..])
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address, hex_literal::hex};

    #[test]
    fn orders_tokens() {
        let (a, b) = (Address::repeat_byte(1), Address::repeat_byte(2));
        assert_eq!(TokenPair::new(b, a).unwrap().get(), (a, b));
        assert_eq!(TokenPair::new(a, b), TokenPair::new(b, a));
        assert!(TokenPair::new(a, a).is_none());
    }

    #[test]
    fn mainnet_pair_address() {
        // https://info.uniswap.org/pair/0x3e8468f66d30fc99f745481d4b383f89861702c6
        let provider = PairProvider {
            factory: address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f"),
            init_code_digest: hex!(
                "96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f"
            ),
        };
        let gno = address!("6810e776880c02933d47db1b9fc05908e5386b96");
        let weth = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
        let pair = TokenPair::new(gno, weth).unwrap();
        assert_eq!(
            provider.pair_address(&pair),
            address!("3e8468f66d30fc99f745481d4b383f89861702c6")
        );
    }
}
