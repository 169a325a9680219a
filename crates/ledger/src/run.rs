use {
    crate::{
        domain::{AuctionId, BidRecord, Event, Quote},
        infra::{
            Onchain,
            cli::{self, Command},
            config,
            onchain,
        },
        query,
        source::ChainReader,
    },
    anyhow::Result,
    clap::Parser,
    futures::StreamExt,
};

pub async fn start(args: impl Iterator<Item = String>) -> Result<()> {
    let args = cli::Args::parse_from(args);
    let mut log = observe::Config::default().with_env_filter(&args.log);
    if let Some(threshold) = args.log_stderr_threshold {
        log = log.with_stderr_threshold(threshold);
    }
    if args.log_json {
        log = log.with_json_format();
    }
    observe::tracing::initialize(&log);
    tracing::debug!("running ledger query with {args:#?}");

    let config = config::load(&args.config).await?;
    let provider = onchain::provider(&config.node_url);
    let reader = Onchain::new(provider, &config.addresses, config.pairs);
    run(&reader, &config.pricing, args.command).await
}

async fn run(reader: &dyn ChainReader, pricing: &query::Pricing, command: Command) -> Result<()> {
    match command {
        Command::AuctionReserves { auction_id } => {
            let snapshot = query::auction_reserves(reader, auction_id.map(AuctionId)).await?;
            println!("eth reserve:   {}", snapshot.eth_reserve);
            println!("token reserve: {}", snapshot.asset_reserve);
            println!("last price:    {}", optional(snapshot.last_price));
            println!("average price: {}", optional(snapshot.rolling_average_price));
        }
        Command::Bids { account, sorted } => {
            let mut history = query::combined_bids(reader, account).await?;
            if sorted {
                history = history.sorted();
            }
            for record in history {
                print_bid(&record);
            }
        }
        Command::SpotPrice => print_quote(&query::spot_price(reader, pricing).await?),
        Command::PricePerNative => print_quote(&query::price_per_native(reader, pricing).await?),
        Command::MarketCap => println!("{}", query::market_cap(reader, pricing).await?),
        Command::TotalSupply => println!("{}", query::total_supply(reader).await?),
        Command::ShareRate => println!("{}", query::share_rate(reader).await?),
        Command::TotalShares => println!("{}", query::total_shares(reader).await?),
        Command::CurrentAuctionId => println!("{}", query::current_auction_id(reader).await?),
        Command::NextWeeklyAuctionId => {
            println!("{}", query::next_weekly_auction_id(reader).await?)
        }
        Command::CurrentAuctionBid => println!("{}", query::current_auction_bid(reader).await?),
        Command::NextBigPayday => println!("{}", query::next_big_payday_amount(reader).await?),
        Command::BigPaydayAmounts => {
            for (year, amount) in query::big_payday_amounts(reader)
                .await?
                .into_iter()
                .enumerate()
            {
                println!("year {}: {amount}", year + 1);
            }
        }
        Command::CurrentBlock => println!("{}", query::current_block(reader).await?),
        Command::Events { kind, from, to } => {
            for event in query::past_events(reader, kind.into(), from, to).await? {
                print_event(&event);
            }
        }
        Command::Subscribe { kind } => {
            let mut events = query::subscribe(reader, kind.into()).await?;
            while let Some(event) = events.next().await {
                print_event(&event?);
            }
        }
    }
    Ok(())
}

fn optional(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".to_owned(), |value| value.to_string())
}

fn print_quote(quote: &Quote) {
    println!("input:         {}", quote.input_amount);
    println!("output:        {}", quote.output_amount);
    println!("price:         {}", quote.execution_price);
    println!("inverse price: {}", quote.inverse_price);
}

fn print_bid(record: &BidRecord) {
    let generation = match record {
        BidRecord::Legacy(_) => "legacy",
        BidRecord::Current(_) => "current",
    };
    println!(
        "auction {} ({generation}): deposit {} referrer {} withdrawn {} auto stake days {}",
        record.auction_id(),
        record.deposit_amount(),
        optional(record.referrer()),
        optional(record.withdrawn()),
        optional(record.auto_stake_days()),
    );
}

fn print_event(event: &Event) {
    println!(
        "{} block {} account {} id {} amount {} tx {}",
        event.kind,
        optional(event.block_number),
        event.account,
        event.id,
        event.amount,
        optional(event.transaction_hash),
    );
}
