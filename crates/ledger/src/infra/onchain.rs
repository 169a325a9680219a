//! [`ChainReader`] backed by a JSON RPC node.

use {
    super::{
        config::Addresses,
        pair::{PairProvider, TokenPair},
    },
    crate::{
        domain::{AuctionId, BlockRange, BlockRef, EventKind, LogRecord, RawReserves},
        source::{ChainReader, RawCurrentBid, RawLegacyBid, RawPool},
    },
    alloy::{
        eips::BlockNumberOrTag,
        primitives::{Address, U256},
        providers::{Provider, ProviderBuilder},
        rpc::{
            client::ClientBuilder,
            types::{Filter, Log},
        },
        sol_types::SolEvent,
    },
    anyhow::{Context, Result},
    contracts::{Auction, AuctionLegacy, AxionStaking, AxionToken, BigPayDay, IUniswapV2Pair},
    futures::{StreamExt, future, stream::BoxStream},
    url::Url,
};

pub fn provider(url: &Url) -> contracts::Provider {
    let rpc = ClientBuilder::default().http(url.clone());
    ProviderBuilder::new().connect_client(rpc).erased()
}

/// Reads everything from the configured deployments through one provider.
pub struct Onchain {
    provider: contracts::Provider,
    token: AxionToken::Instance,
    staking: AxionStaking::Instance,
    auction: Auction::Instance,
    legacy_auction: AuctionLegacy::Instance,
    big_pay_day: BigPayDay::Instance,
    pairs: PairProvider,
}

impl Onchain {
    pub fn new(provider: contracts::Provider, addresses: &Addresses, pairs: PairProvider) -> Self {
        Self {
            token: AxionToken::Instance::new(addresses.current.token, provider.clone()),
            staking: AxionStaking::Instance::new(addresses.current.staking, provider.clone()),
            auction: Auction::Instance::new(addresses.current.auction, provider.clone()),
            legacy_auction: AuctionLegacy::Instance::new(
                addresses.legacy.auction,
                provider.clone(),
            ),
            big_pay_day: BigPayDay::Instance::new(addresses.current.big_pay_day, provider.clone()),
            provider,
            pairs,
        }
    }

    /// Base filter for logs of one event kind, emitted by the contract that
    /// owns it.
    fn filter(&self, kind: EventKind) -> Filter {
        let (address, signature) = match kind {
            EventKind::Bid => (*self.auction.address(), Auction::Auction::Bid::SIGNATURE_HASH),
            EventKind::Withdrawal => (
                *self.auction.address(),
                Auction::Auction::Withdraval::SIGNATURE_HASH,
            ),
            EventKind::Stake => (
                *self.staking.address(),
                AxionStaking::AxionStaking::Stake::SIGNATURE_HASH,
            ),
            EventKind::Unstake => (
                *self.staking.address(),
                AxionStaking::AxionStaking::Unstake::SIGNATURE_HASH,
            ),
        };
        Filter::new().address(address).event_signature(signature)
    }
}

#[async_trait::async_trait]
impl ChainReader for Onchain {
    async fn auction_reserves(&self, auction_id: AuctionId) -> Result<RawReserves> {
        let reserves = self
            .auction
            .reservesOf(U256::from(auction_id.0))
            .call()
            .await
            .with_context(|| format!("reservesOf({auction_id})"))?;
        Ok(RawReserves {
            eth: reserves.eth,
            token: reserves.token,
            last_price: reserves.uniswapLastPrice,
            middle_price: reserves.uniswapMiddlePrice,
        })
    }

    async fn legacy_bids(&self, account: Address) -> Result<Vec<RawLegacyBid>> {
        let ids = self
            .legacy_auction
            .auctionsOf_(account)
            .call()
            .await
            .context("legacy auctionsOf_")?;
        future::try_join_all(ids.into_iter().map(|id| async move {
            let bid = self
                .legacy_auction
                .auctionBetOf(id, account)
                .call()
                .await
                .with_context(|| format!("legacy auctionBetOf({id})"))?;
            Ok(RawLegacyBid {
                auction_id: auction_id(id)?,
                eth: bid.eth,
                referrer: bid.referrer,
            })
        }))
        .await
    }

    async fn current_bids(&self, account: Address) -> Result<Vec<RawCurrentBid>> {
        let ids = self
            .auction
            .auctionsOf_(account)
            .call()
            .await
            .context("auctionsOf_")?;
        future::try_join_all(ids.into_iter().map(|id| async move {
            let bid = self
                .auction
                .auctionBidOf(id, account)
                .call()
                .await
                .with_context(|| format!("auctionBidOf({id})"))?;
            Ok(RawCurrentBid {
                auction_id: auction_id(id)?,
                eth: bid.eth,
                referrer: bid.referrer,
                withdrawn: bid.withdrawn,
                auto_stake_days: u64::try_from(bid.autoStakeDays)
                    .ok()
                    .context("auto stake days do not fit into u64")?,
            })
        }))
        .await
    }

    async fn current_auction_id(&self) -> Result<AuctionId> {
        let id = self
            .auction
            .calculateStepsFromStart()
            .call()
            .await
            .context("calculateStepsFromStart")?;
        auction_id(id)
    }

    async fn next_weekly_auction_id(&self) -> Result<AuctionId> {
        let id = self
            .auction
            .calculateNearestWeeklyAuction()
            .call()
            .await
            .context("calculateNearestWeeklyAuction")?;
        auction_id(id)
    }

    async fn middle_price_seven_days(&self) -> Result<U256> {
        self.auction
            .getUniswapMiddlePriceForSevenDays()
            .call()
            .await
            .context("getUniswapMiddlePriceForSevenDays")
    }

    async fn pool_reserves(&self, token_in: Address, token_out: Address) -> Result<RawPool> {
        let pair = TokenPair::new(token_in, token_out)
            .with_context(|| format!("no pool between {token_in} and itself"))?;
        let address = self.pairs.pair_address(&pair);
        let reserves = IUniswapV2Pair::Instance::new(address, self.provider.clone())
            .getReserves()
            .call()
            .await
            .with_context(|| format!("getReserves of pair {address}"))?;

        // Reserves are uint112 and therefore always fit.
        let reserve0 = U256::from(
            u128::try_from(reserves.reserve0)
                .ok()
                .context("reserve0 does not fit into u128")?,
        );
        let reserve1 = U256::from(
            u128::try_from(reserves.reserve1)
                .ok()
                .context("reserve1 does not fit into u128")?,
        );
        let (token0, _) = pair.get();
        Ok(if token_in == token0 {
            RawPool {
                reserve_in: reserve0,
                reserve_out: reserve1,
            }
        } else {
            RawPool {
                reserve_in: reserve1,
                reserve_out: reserve0,
            }
        })
    }

    async fn total_supply(&self) -> Result<U256> {
        self.token
            .totalSupply()
            .call()
            .await
            .context("totalSupply")
    }

    async fn share_rate(&self) -> Result<U256> {
        self.staking.shareRate().call().await.context("shareRate")
    }

    async fn total_shares(&self) -> Result<U256> {
        self.staking
            .sharesTotalSupply()
            .call()
            .await
            .context("sharesTotalSupply")
    }

    async fn next_big_payday_amount(&self) -> Result<U256> {
        self.big_pay_day
            .getClosestPoolAmount()
            .call()
            .await
            .context("getClosestPoolAmount")
    }

    async fn big_payday_amounts(&self) -> Result<Vec<U256>> {
        let amounts = self
            .big_pay_day
            .getPoolYearAmounts()
            .call()
            .await
            .context("getPoolYearAmounts")?;
        Ok(amounts.to_vec())
    }

    async fn block_number(&self) -> Result<u64> {
        self.provider
            .get_block_number()
            .await
            .context("failed to fetch current block")
    }

    async fn past_events(&self, kind: EventKind, range: BlockRange) -> Result<Vec<LogRecord>> {
        let filter = self
            .filter(kind)
            .from_block(range.start())
            .to_block(block_number_or_tag(range.end()));
        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .with_context(|| format!("failed to fetch {kind} logs"))?;
        logs.iter().map(|log| decode(kind, log)).collect()
    }

    async fn subscribe(&self, kind: EventKind) -> Result<BoxStream<'static, Result<LogRecord>>> {
        let filter = self.filter(kind).from_block(BlockNumberOrTag::Latest);
        let poller = self
            .provider
            .watch_logs(&filter)
            .await
            .with_context(|| format!("failed to install {kind} log filter"))?;
        Ok(poller
            .into_stream()
            .flat_map(futures::stream::iter)
            .map(move |log| decode(kind, &log))
            .boxed())
    }
}

fn auction_id(id: U256) -> Result<AuctionId> {
    u64::try_from(id)
        .ok()
        .map(AuctionId)
        .with_context(|| format!("auction id {id} does not fit into u64"))
}

fn block_number_or_tag(block: BlockRef) -> BlockNumberOrTag {
    match block {
        BlockRef::Number(number) => BlockNumberOrTag::Number(number),
        BlockRef::Latest => BlockNumberOrTag::Latest,
    }
}

fn decode(kind: EventKind, log: &Log) -> Result<LogRecord> {
    let (account, id, amount) = match kind {
        EventKind::Bid => {
            let event = Auction::Auction::Bid::decode_log(&log.inner)?.data;
            (event.account, event.auctionId, event.value)
        }
        EventKind::Withdrawal => {
            let event = Auction::Auction::Withdraval::decode_log(&log.inner)?.data;
            (event.account, event.auctionId, event.value)
        }
        EventKind::Stake => {
            let event = AxionStaking::AxionStaking::Stake::decode_log(&log.inner)?.data;
            (event.account, event.sessionId, event.amount)
        }
        EventKind::Unstake => {
            let event = AxionStaking::AxionStaking::Unstake::decode_log(&log.inner)?.data;
            (event.account, event.sessionId, event.amount)
        }
    };
    Ok(LogRecord {
        kind,
        account,
        id,
        amount,
        block_number: log.block_number,
        transaction_hash: log.transaction_hash,
    })
}
