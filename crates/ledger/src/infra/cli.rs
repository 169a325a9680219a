//! CLI arguments for the `ledger-query` binary.

use {
    crate::domain::{BlockRef, EventKind},
    alloy::primitives::Address,
    clap::{Parser, Subcommand, ValueEnum},
    std::path::PathBuf,
};

/// Query the Axion contracts
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Path to the ledger configuration file. This file should be in TOML
    /// format.
    #[arg(long, env)]
    pub config: PathBuf,

    /// The log filter.
    #[arg(long, env, default_value = "warn,ledger=info")]
    pub log: String,

    /// Log messages at or above this level go to stderr instead of stdout.
    #[arg(long, env)]
    pub log_stderr_threshold: Option<tracing::Level>,

    /// Log in JSON format.
    #[arg(long, env)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// The query to run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reserves of one auction round.
    AuctionReserves {
        #[arg(long)]
        auction_id: Option<u64>,
    },
    /// Bid history of an account across both auction deployments.
    Bids {
        #[arg(long)]
        account: Option<Address>,
        /// Order the history by auction id.
        #[arg(long)]
        sorted: bool,
    },
    /// Price of one primary token in the reference asset.
    SpotPrice,
    /// Primary tokens one native unit buys.
    PricePerNative,
    MarketCap,
    TotalSupply,
    ShareRate,
    TotalShares,
    CurrentAuctionId,
    NextWeeklyAuctionId,
    /// Seven day average price the current auction bids at.
    CurrentAuctionBid,
    NextBigPayday,
    BigPaydayAmounts,
    CurrentBlock,
    /// Past events of one kind.
    Events {
        kind: Event,
        #[arg(long)]
        from: Option<u64>,
        /// A block number or `latest`.
        #[arg(long, default_value = "latest")]
        to: BlockRef,
    },
    /// Follow new events of one kind until interrupted.
    Subscribe { kind: Event },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Event {
    Bid,
    Withdrawal,
    Stake,
    Unstake,
}

impl From<Event> for EventKind {
    fn from(value: Event) -> Self {
        match value {
            Event::Bid => Self::Bid,
            Event::Withdrawal => Self::Withdrawal,
            Event::Stake => Self::Stake,
            Event::Unstake => Self::Unstake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(
            ["ledger-query", "--config", "ledger.toml"]
                .iter()
                .chain(args)
                .copied(),
        )
        .unwrap()
    }

    #[test]
    fn parses_event_queries() {
        let args = parse(&["events", "stake", "--from", "10"]);
        assert!(matches!(
            args.command,
            Command::Events {
                kind: Event::Stake,
                from: Some(10),
                to: BlockRef::Latest,
            }
        ));

        let args = parse(&["events", "bid", "--to", "99"]);
        assert!(matches!(
            args.command,
            Command::Events {
                from: None,
                to: BlockRef::Number(99),
                ..
            }
        ));
    }

    #[test]
    fn identifiers_are_optional() {
        assert!(matches!(
            parse(&["auction-reserves"]).command,
            Command::AuctionReserves { auction_id: None }
        ));
        assert!(matches!(
            parse(&["bids", "--account", "0x1111111111111111111111111111111111111111"]).command,
            Command::Bids {
                account: Some(_),
                sorted: false
            }
        ));
    }
}
