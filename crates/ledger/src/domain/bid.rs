use {alloy::primitives::Address, bigdecimal::BigDecimal, std::fmt};

/// Identifier of one auction round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct AuctionId(pub u64);

impl fmt::Display for AuctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AuctionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A participation recorded by the legacy auction deployment. These records
/// are immutable history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyBid {
    pub auction_id: AuctionId,
    /// A zero deposit usually means the position was withdrawn or migrated
    /// and its balance now lives on the current deployment.
    pub deposit_amount: BigDecimal,
    pub referrer: Option<Address>,
}

/// A participation recorded by the current auction deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentBid {
    pub auction_id: AuctionId,
    pub deposit_amount: BigDecimal,
    pub referrer: Option<Address>,
    pub auto_stake_days: u64,
    /// Flips from `false` to `true` exactly once.
    pub withdrawn: bool,
}

/// One entry of an account's bid history, tagged with the deployment it was
/// read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BidRecord {
    Legacy(LegacyBid),
    Current(CurrentBid),
}

impl BidRecord {
    pub fn auction_id(&self) -> AuctionId {
        match self {
            Self::Legacy(bid) => bid.auction_id,
            Self::Current(bid) => bid.auction_id,
        }
    }

    pub fn deposit_amount(&self) -> &BigDecimal {
        match self {
            Self::Legacy(bid) => &bid.deposit_amount,
            Self::Current(bid) => &bid.deposit_amount,
        }
    }

    pub fn referrer(&self) -> Option<Address> {
        match self {
            Self::Legacy(bid) => bid.referrer,
            Self::Current(bid) => bid.referrer,
        }
    }

    /// Legacy records carry no withdrawal state.
    pub fn withdrawn(&self) -> Option<bool> {
        match self {
            Self::Legacy(_) => None,
            Self::Current(bid) => Some(bid.withdrawn),
        }
    }

    /// Legacy records carry no auto-stake metadata.
    pub fn auto_stake_days(&self) -> Option<u64> {
        match self {
            Self::Legacy(_) => None,
            Self::Current(bid) => Some(bid.auto_stake_days),
        }
    }
}

/// The zero address is used by the contracts to signal "no referrer".
pub fn referrer(address: Address) -> Option<Address> {
    (!address.is_zero()).then_some(address)
}
