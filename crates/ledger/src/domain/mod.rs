pub mod bid;
pub mod event;
pub mod reconcile;
pub mod reserves;
pub mod route;

pub use {
    bid::{AuctionId, BidRecord, CurrentBid, LegacyBid},
    event::{BlockRange, BlockRef, Event, EventKind, LogRecord},
    reconcile::{CombinedHistory, reconcile},
    reserves::{RawReserves, ReserveSnapshot},
    route::{Fee, LiquidityPool, Quote, Route, TradeType, quote},
};
