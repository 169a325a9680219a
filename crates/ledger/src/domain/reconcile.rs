//! Merging of per-account bid histories from both auction deployments.

use {
    super::bid::{AuctionId, BidRecord, CurrentBid, LegacyBid},
    std::collections::HashSet,
};

/// The bid history of one account spanning both deployments.
///
/// Entries are ordered as surviving legacy records followed by all current
/// records in the order they were read. This is *not* a global ascending
/// order by auction id, use [`CombinedHistory::sorted`] when one is needed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombinedHistory(Vec<BidRecord>);

impl CombinedHistory {
    pub fn records(&self) -> &[BidRecord] {
        &self.0
    }

    pub fn into_records(self) -> Vec<BidRecord> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the history ordered by auction id. The sort is stable, so a
    /// legacy record keeps preceding a current record with the same id.
    pub fn sorted(mut self) -> Self {
        self.0.sort_by_key(BidRecord::auction_id);
        self
    }
}

impl IntoIterator for CombinedHistory {
    type IntoIter = std::vec::IntoIter<BidRecord>;
    type Item = BidRecord;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Merges the records of both deployments into one history.
///
/// A legacy record is kept only if no current record exists for the same
/// auction id. Presence on the current deployment means the position was
/// migrated, and the current record is the source of truth for withdrawal
/// state and auto-stake metadata. Only the id is compared, never the amounts
/// or referrers. Zero deposits are passed through untouched.
pub fn reconcile(legacy: Vec<LegacyBid>, current: Vec<CurrentBid>) -> CombinedHistory {
    let migrated: HashSet<AuctionId> = current.iter().map(|bid| bid.auction_id).collect();
    let superseded = legacy
        .iter()
        .filter(|bid| migrated.contains(&bid.auction_id))
        .count();
    if superseded > 0 {
        tracing::debug!(superseded, "dropping legacy bids superseded by current ones");
    }

    let mut records = Vec::with_capacity(legacy.len() - superseded + current.len());
    records.extend(
        legacy
            .into_iter()
            .filter(|bid| !migrated.contains(&bid.auction_id))
            .map(BidRecord::Legacy),
    );
    records.extend(current.into_iter().map(BidRecord::Current));
    CombinedHistory(records)
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::Address, bigdecimal::BigDecimal, std::str::FromStr};

    fn amount(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn legacy(id: u64, deposit: &str) -> LegacyBid {
        LegacyBid {
            auction_id: AuctionId(id),
            deposit_amount: amount(deposit),
            referrer: None,
        }
    }

    fn current(id: u64, deposit: &str, withdrawn: bool) -> CurrentBid {
        CurrentBid {
            auction_id: AuctionId(id),
            deposit_amount: amount(deposit),
            referrer: None,
            auto_stake_days: 14,
            withdrawn,
        }
    }

    fn ids(history: &CombinedHistory) -> Vec<u64> {
        history.records().iter().map(|r| r.auction_id().0).collect()
    }

    #[test]
    fn current_record_supersedes_legacy_one() {
        let history = reconcile(vec![legacy(1, "2.0")], vec![current(1, "0", true)]);
        assert_eq!(
            history.into_records(),
            vec![BidRecord::Current(current(1, "0", true))]
        );
    }

    #[test]
    fn exactly_one_entry_per_migrated_id() {
        let history = reconcile(
            vec![legacy(3, "1"), legacy(7, "4.5"), legacy(9, "1")],
            vec![current(7, "4.5", false)],
        );
        let sevens: Vec<_> = history
            .records()
            .iter()
            .filter(|r| r.auction_id() == AuctionId(7))
            .collect();
        assert_eq!(sevens, vec![&BidRecord::Current(current(7, "4.5", false))]);
    }

    #[test]
    fn keeps_legacy_first_then_current_in_read_order() {
        let history = reconcile(
            vec![legacy(5, "1"), legacy(2, "1"), legacy(4, "1")],
            vec![current(4, "1", false), current(1, "1", false), current(3, "1", true)],
        );
        // Not ascending: surviving legacy ids in read order, then current ids.
        assert_eq!(ids(&history), vec![5, 2, 4, 1, 3]);
        assert_eq!(ids(&history.sorted()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn zero_legacy_deposits_pass_through() {
        let history = reconcile(vec![legacy(2, "0")], vec![]);
        assert_eq!(history.records()[0].deposit_amount(), &amount("0"));
        assert_eq!(history.records()[0].withdrawn(), None);
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let inputs = || {
            (
                vec![legacy(1, "1"), legacy(2, "3")],
                vec![current(2, "3", false), current(8, "0.1", false)],
            )
        };
        let (l, c) = inputs();
        let first = reconcile(l, c);
        let (l, c) = inputs();
        let second = reconcile(l, c);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_inputs() {
        assert!(reconcile(vec![], vec![]).is_empty());
        assert_eq!(ids(&reconcile(vec![legacy(1, "1")], vec![])), vec![1]);
        assert_eq!(ids(&reconcile(vec![], vec![current(1, "1", false)])), vec![1]);
    }

    /// The filter only compares ids. Two genuinely different participations
    /// that happen to share a round id still collapse into the current one.
    /// This documents the behaviour, it is not a statement that it is correct.
    #[test]
    fn distinct_participations_with_same_id_are_collapsed() {
        let other_referrer = LegacyBid {
            referrer: Some(Address::repeat_byte(0x11)),
            ..legacy(6, "10")
        };
        let history = reconcile(vec![other_referrer], vec![current(6, "0.5", false)]);
        assert_eq!(history.len(), 1);
        assert_eq!(history.records()[0].deposit_amount(), &amount("0.5"));
        assert_eq!(history.records()[0].referrer(), None);
    }
}
