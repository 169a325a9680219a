//! The boundary to the chain. Everything the facade knows about the outside
//! world goes through [`ChainReader`], which keeps every query testable with
//! a fake reader.

use {
    crate::domain::{AuctionId, BlockRange, EventKind, LogRecord, RawReserves},
    alloy::primitives::{Address, U256},
    anyhow::Result,
    futures::stream::BoxStream,
};

/// A bid as returned by the legacy auction deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawLegacyBid {
    pub auction_id: AuctionId,
    pub eth: U256,
    pub referrer: Address,
}

/// A bid as returned by the current auction deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawCurrentBid {
    pub auction_id: AuctionId,
    pub eth: U256,
    pub referrer: Address,
    pub withdrawn: bool,
    pub auto_stake_days: u64,
}

/// Reserves of a pool in base units, oriented from the sold to the bought
/// token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawPool {
    pub reserve_in: U256,
    pub reserve_out: U256,
}

/// Read access to the ledger's contracts. Implementations are expected to
/// be all-or-nothing per call, retries are their own business.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait ChainReader: Send + Sync {
    async fn auction_reserves(&self, auction_id: AuctionId) -> Result<RawReserves>;

    async fn legacy_bids(&self, account: Address) -> Result<Vec<RawLegacyBid>>;

    async fn current_bids(&self, account: Address) -> Result<Vec<RawCurrentBid>>;

    async fn current_auction_id(&self) -> Result<AuctionId>;

    async fn next_weekly_auction_id(&self) -> Result<AuctionId>;

    /// Seven day average price of the primary token per native unit.
    async fn middle_price_seven_days(&self) -> Result<U256>;

    async fn pool_reserves(&self, token_in: Address, token_out: Address) -> Result<RawPool>;

    async fn total_supply(&self) -> Result<U256>;

    async fn share_rate(&self) -> Result<U256>;

    async fn total_shares(&self) -> Result<U256>;

    async fn next_big_payday_amount(&self) -> Result<U256>;

    async fn big_payday_amounts(&self) -> Result<Vec<U256>>;

    async fn block_number(&self) -> Result<u64>;

    async fn past_events(&self, kind: EventKind, range: BlockRange) -> Result<Vec<LogRecord>>;

    /// Live stream of new events of the given kind. Whatever the chain
    /// delivers is forwarded, nothing is buffered or deduplicated.
    async fn subscribe(&self, kind: EventKind) -> Result<BoxStream<'static, Result<LogRecord>>>;
}
