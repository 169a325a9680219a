//! The queries the ledger answers. Every query is a stateless function of the
//! reader it is given and the reads it issues, so concurrent queries never
//! interfere with each other.

use {
    crate::{
        domain::{
            AuctionId,
            BlockRange,
            BlockRef,
            CombinedHistory,
            CurrentBid,
            Event,
            EventKind,
            Fee,
            LegacyBid,
            LiquidityPool,
            Quote,
            ReserveSnapshot,
            Route,
            TradeType,
            bid,
            reconcile,
            route,
        },
        error::Error,
        source::{ChainReader, RawCurrentBid, RawLegacyBid},
    },
    alloy::primitives::Address,
    bigdecimal::BigDecimal,
    futures::{StreamExt, TryFutureExt, future, stream::BoxStream},
    number::units::{Scale, u256_to_decimal},
    tracing::instrument,
};

/// A token taking part in price computations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Asset {
    pub address: Address,
    pub scale: Scale,
}

/// Everything needed to price the primary token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pricing {
    /// The token being priced.
    pub primary: Asset,
    /// The intermediate asset most liquidity is paired with.
    pub native: Asset,
    /// The asset prices are denominated in.
    pub reference: Asset,
    pub fee: Fee,
    pub significant_digits: u32,
}

impl Pricing {
    /// Path used for the spot price, hopping over the native asset unless
    /// the reference asset is the native asset itself.
    fn spot_path(&self) -> Vec<Asset> {
        if self.reference.address == self.native.address {
            vec![self.primary, self.reference]
        } else {
            vec![self.primary, self.native, self.reference]
        }
    }
}

/// Normalized reserves of one auction round.
#[instrument(skip_all, fields(?auction_id))]
pub async fn auction_reserves(
    reader: &dyn ChainReader,
    auction_id: Option<AuctionId>,
) -> Result<ReserveSnapshot, Error> {
    let auction_id = auction_id.ok_or(Error::MissingParameter("the id of the auction"))?;
    let raw = reader
        .auction_reserves(auction_id)
        .await
        .map_err(Error::upstream)?;
    Ok(ReserveSnapshot::normalize(raw))
}

/// The bid history of an account across both auction deployments.
#[instrument(skip_all, fields(?account))]
pub async fn combined_bids(
    reader: &dyn ChainReader,
    account: Option<Address>,
) -> Result<CombinedHistory, Error> {
    let account = account
        .filter(|account| !account.is_zero())
        .ok_or(Error::MissingParameter("an account address"))?;

    let (legacy, current) = future::try_join(
        reader.legacy_bids(account),
        reader.current_bids(account),
    )
    .await
    .map_err(Error::upstream)?;
    tracing::debug!(legacy = legacy.len(), current = current.len(), "fetched bids");

    Ok(reconcile(
        legacy.into_iter().map(normalize_legacy_bid).collect(),
        current.into_iter().map(normalize_current_bid).collect(),
    ))
}

fn normalize_legacy_bid(raw: RawLegacyBid) -> LegacyBid {
    LegacyBid {
        auction_id: raw.auction_id,
        deposit_amount: u256_to_decimal(raw.eth, Scale::ETHER),
        referrer: bid::referrer(raw.referrer),
    }
}

fn normalize_current_bid(raw: RawCurrentBid) -> CurrentBid {
    CurrentBid {
        auction_id: raw.auction_id,
        deposit_amount: u256_to_decimal(raw.eth, Scale::ETHER),
        referrer: bid::referrer(raw.referrer),
        auto_stake_days: raw.auto_stake_days,
        withdrawn: raw.withdrawn,
    }
}

/// Price of one whole primary token denominated in the reference asset.
#[instrument(skip_all)]
pub async fn spot_price(reader: &dyn ChainReader, pricing: &Pricing) -> Result<Quote, Error> {
    quote_path(reader, &pricing.spot_path(), &BigDecimal::from(1), pricing).await
}

/// Amount of the primary token one whole native unit currently buys.
#[instrument(skip_all)]
pub async fn price_per_native(reader: &dyn ChainReader, pricing: &Pricing) -> Result<Quote, Error> {
    quote_path(
        reader,
        &[pricing.native, pricing.primary],
        &BigDecimal::from(1),
        pricing,
    )
    .await
}

/// Spot price times supply, denominated in the reference asset.
#[instrument(skip_all)]
pub async fn market_cap(reader: &dyn ChainReader, pricing: &Pricing) -> Result<BigDecimal, Error> {
    let (price, supply) =
        future::try_join(spot_price(reader, pricing), total_supply(reader)).await?;
    Ok(price.execution_price * supply)
}

/// Reads the pools along `path` concurrently and quotes `amount` of the
/// first asset through them.
async fn quote_path(
    reader: &dyn ChainReader,
    path: &[Asset],
    amount: &BigDecimal,
    pricing: &Pricing,
) -> Result<Quote, Error> {
    if path.len() < 2 || path.len() > route::MAX_HOPS + 1 {
        return Err(Error::InvalidRoute(path.len().saturating_sub(1)));
    }
    let pools = future::try_join_all(path.windows(2).map(|hop| {
        let (sell, buy) = (hop[0], hop[1]);
        reader
            .pool_reserves(sell.address, buy.address)
            .map_ok(move |raw| {
                LiquidityPool::new(
                    u256_to_decimal(raw.reserve_in, sell.scale),
                    u256_to_decimal(raw.reserve_out, buy.scale),
                )
            })
    }))
    .await
    .map_err(Error::upstream)?;

    let route = Route::new(pools)?;
    let quote = route::quote(
        &route,
        amount,
        TradeType::ExactInput,
        pricing.fee,
        pricing.significant_digits,
    )?;
    tracing::debug!(price = %quote.execution_price, hops = route.pools().len(), "quoted route");
    Ok(quote)
}

pub async fn total_supply(reader: &dyn ChainReader) -> Result<BigDecimal, Error> {
    let supply = reader.total_supply().await.map_err(Error::upstream)?;
    Ok(u256_to_decimal(supply, Scale::ETHER))
}

pub async fn share_rate(reader: &dyn ChainReader) -> Result<BigDecimal, Error> {
    let rate = reader.share_rate().await.map_err(Error::upstream)?;
    Ok(u256_to_decimal(rate, Scale::ETHER))
}

pub async fn total_shares(reader: &dyn ChainReader) -> Result<BigDecimal, Error> {
    let shares = reader.total_shares().await.map_err(Error::upstream)?;
    Ok(u256_to_decimal(shares, Scale::ETHER))
}

pub async fn current_auction_id(reader: &dyn ChainReader) -> Result<AuctionId, Error> {
    reader.current_auction_id().await.map_err(Error::upstream)
}

pub async fn next_weekly_auction_id(reader: &dyn ChainReader) -> Result<AuctionId, Error> {
    reader.next_weekly_auction_id().await.map_err(Error::upstream)
}

/// The seven day average price, which is what the current auction bids at.
pub async fn current_auction_bid(reader: &dyn ChainReader) -> Result<BigDecimal, Error> {
    let price = reader
        .middle_price_seven_days()
        .await
        .map_err(Error::upstream)?;
    Ok(u256_to_decimal(price, Scale::ETHER))
}

pub async fn next_big_payday_amount(reader: &dyn ChainReader) -> Result<BigDecimal, Error> {
    let amount = reader
        .next_big_payday_amount()
        .await
        .map_err(Error::upstream)?;
    Ok(u256_to_decimal(amount, Scale::ETHER))
}

pub async fn big_payday_amounts(reader: &dyn ChainReader) -> Result<Vec<BigDecimal>, Error> {
    let amounts = reader.big_payday_amounts().await.map_err(Error::upstream)?;
    Ok(amounts
        .into_iter()
        .map(|amount| u256_to_decimal(amount, Scale::ETHER))
        .collect())
}

pub async fn current_block(reader: &dyn ChainReader) -> Result<u64, Error> {
    reader.block_number().await.map_err(Error::upstream)
}

/// Events of one kind between `start` and `end`, both inclusive.
#[instrument(skip_all, fields(%kind, ?start, %end))]
pub async fn past_events(
    reader: &dyn ChainReader,
    kind: EventKind,
    start: Option<u64>,
    end: BlockRef,
) -> Result<Vec<Event>, Error> {
    let start = start.ok_or(Error::MissingParameter("a start block"))?;
    let range = BlockRange::try_new(start, end)?;
    let logs = reader
        .past_events(kind, range)
        .await
        .map_err(Error::upstream)?;
    tracing::debug!(count = logs.len(), "fetched events");
    Ok(logs.into_iter().map(Event::from).collect())
}

/// Follows new events of one kind.
#[instrument(skip_all, fields(%kind))]
pub async fn subscribe(
    reader: &dyn ChainReader,
    kind: EventKind,
) -> Result<BoxStream<'static, Result<Event, Error>>, Error> {
    let logs = reader.subscribe(kind).await.map_err(Error::upstream)?;
    Ok(logs
        .map(|log| log.map(Event::from).map_err(Error::upstream))
        .boxed())
}
