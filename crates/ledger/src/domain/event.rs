use {
    crate::error::Error,
    alloy::primitives::{Address, B256, U256},
    bigdecimal::BigDecimal,
    number::units::{Scale, u256_to_decimal},
    std::{fmt, str::FromStr},
};

/// Contract events the ledger can query and follow.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// Someone entered an auction.
    Bid,
    /// Someone withdrew from an auction.
    Withdrawal,
    /// A stake was created.
    Stake,
    /// A stake was ended.
    Unstake,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bid => "bid",
            Self::Withdrawal => "withdrawal",
            Self::Stake => "stake",
            Self::Unstake => "unstake",
        })
    }
}

/// Block reference used as the upper bound of a log query.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BlockRef {
    Number(u64),
    #[default]
    Latest,
}

impl FromStr for BlockRef {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Self::Latest),
            number => number.parse().map(Self::Number),
        }
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Latest => f.write_str("latest"),
        }
    }
}

/// A validated block range, the end is either the latest block or not
/// smaller than the start.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlockRange {
    start: u64,
    end: BlockRef,
}

impl BlockRange {
    pub fn try_new(start: u64, end: BlockRef) -> Result<Self, Error> {
        if let BlockRef::Number(number) = end {
            if number < start {
                return Err(Error::InvalidBlockRange { start, end: number });
            }
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> BlockRef {
        self.end
    }
}

/// An event log as delivered by the chain, amounts in base units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub kind: EventKind,
    pub account: Address,
    /// Auction id for auction events, stake session id for staking events.
    pub id: U256,
    pub amount: U256,
    pub block_number: Option<u64>,
    pub transaction_hash: Option<B256>,
}

/// A [`LogRecord`] with its amount normalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub account: Address,
    pub id: U256,
    pub amount: BigDecimal,
    pub block_number: Option<u64>,
    pub transaction_hash: Option<B256>,
}

impl From<LogRecord> for Event {
    fn from(log: LogRecord) -> Self {
        Self {
            kind: log.kind,
            account: log.account,
            id: log.id,
            amount: u256_to_decimal(log.amount, Scale::ETHER),
            block_number: log.block_number,
            transaction_hash: log.transaction_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_ranges() {
        assert!(BlockRange::try_new(10, BlockRef::Number(10)).is_ok());
        assert!(BlockRange::try_new(10, BlockRef::Latest).is_ok());
        assert!(matches!(
            BlockRange::try_new(11, BlockRef::Number(10)),
            Err(Error::InvalidBlockRange { start: 11, end: 10 })
        ));
    }

    #[test]
    fn parses_block_refs() {
        assert_eq!("latest".parse::<BlockRef>().unwrap(), BlockRef::Latest);
        assert_eq!("1234".parse::<BlockRef>().unwrap(), BlockRef::Number(1234));
        assert!("-1".parse::<BlockRef>().is_err());
        assert_eq!(BlockRef::default(), BlockRef::Latest);
    }

    #[test]
    fn normalizes_event_amounts() {
        let event = Event::from(LogRecord {
            kind: EventKind::Bid,
            account: Address::repeat_byte(1),
            id: U256::from(12),
            amount: U256::from(250_000_000_000_000_000u64),
            block_number: Some(100),
            transaction_hash: None,
        });
        assert_eq!(event.amount, "0.25".parse::<BigDecimal>().unwrap());
        assert_eq!(event.id, U256::from(12));
    }
}
