//! The auto-confirmation rule.
//!
//! One transition, ever: `Draft -> Confirmed`, iff the rollup shows at least
//! one item and a positive total. Every other status — including values this
//! pipeline does not know — is terminal here and passes through unchanged.

use billsync_core::{BillNo, BillStatus};
use billsync_store::{RecordStore, RemoteError};

use crate::bills::BillRepository;
use crate::rollups::Rollup;

/// Applies the auto-confirmation rule against the Bill collection.
pub struct StatusTransitioner<'a, S: RecordStore> {
    bills: &'a BillRepository<'a, S>,
}

/// Whether the rule fires for the given rollup and current status.
pub fn should_confirm(rollup: &Rollup, current: &BillStatus) -> bool {
    current.is_draft() && rollup.items_count >= 1 && rollup.total_amount > 0.0
}

impl<'a, S: RecordStore> StatusTransitioner<'a, S> {
    pub fn new(bills: &'a BillRepository<'a, S>) -> Self {
        Self { bills }
    }

    /// Apply the rule and return the final status.
    ///
    /// If the rule does not fire, nothing is written and `current` comes
    /// back unchanged. If the bill cannot be resolved at this late stage it
    /// is treated as already out of date: warn, return `current`, no error.
    pub fn apply(
        &self,
        bill_no: &BillNo,
        rollup: &Rollup,
        current: &BillStatus,
    ) -> Result<BillStatus, RemoteError> {
        if !should_confirm(rollup, current) {
            tracing::debug!("keeping status of bill {bill_no} as {current}");
            return Ok(current.clone());
        }

        let Some(record) = self.bills.find_by_number(bill_no)? else {
            tracing::warn!("bill {bill_no} not found for status update; leaving {current}");
            return Ok(current.clone());
        };

        self.bills.set_status(&record.id, &BillStatus::Confirmed)?;
        tracing::info!("auto-confirmed bill {bill_no}");
        Ok(BillStatus::Confirmed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use billsync_core::BillHeader;
    use billsync_store::{CollectionId, MemoryStore};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn rollup(items_count: u64, total_amount: f64) -> Rollup {
        Rollup {
            items_count,
            total_amount,
        }
    }

    #[rstest]
    #[case::fires(rollup(2, 150.0), BillStatus::Draft, true)]
    #[case::single_item(rollup(1, 0.01), BillStatus::Draft, true)]
    #[case::empty_rollup(rollup(0, 0.0), BillStatus::Draft, false)]
    #[case::zero_total(rollup(3, 0.0), BillStatus::Draft, false)]
    #[case::count_without_total(rollup(2, -5.0), BillStatus::Draft, false)]
    #[case::already_confirmed(rollup(5, 500.0), BillStatus::Confirmed, false)]
    #[case::foreign_status(rollup(5, 500.0), BillStatus::Other("Cancelled".into()), false)]
    fn gating_table(#[case] rollup: Rollup, #[case] current: BillStatus, #[case] fires: bool) {
        assert_eq!(should_confirm(&rollup, &current), fires);
    }

    fn upsert_bill(repo: &BillRepository<'_, MemoryStore>, bill_no: &str, status: BillStatus) {
        repo.upsert(&BillHeader {
            bill_no: BillNo::from(bill_no),
            bill_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            customer: "Acme".to_owned(),
            status,
        })
        .unwrap();
    }

    fn read_status(repo: &BillRepository<'_, MemoryStore>, bill_no: &str) -> String {
        repo.find_by_number(&BillNo::from(bill_no))
            .unwrap()
            .unwrap()
            .properties[crate::fields::STATUS]
            .select_name()
            .unwrap()
            .to_owned()
    }

    #[test]
    fn firing_rule_patches_status_and_returns_confirmed() {
        let store = MemoryStore::new();
        let bills_col = CollectionId::from("bills");
        let bills = BillRepository::new(&store, &bills_col);
        upsert_bill(&bills, "B-001", BillStatus::Draft);

        let final_status = StatusTransitioner::new(&bills)
            .apply(&BillNo::from("B-001"), &rollup(2, 150.0), &BillStatus::Draft)
            .unwrap();
        assert_eq!(final_status, BillStatus::Confirmed);
        assert_eq!(read_status(&bills, "B-001"), "Confirmed");
    }

    #[test]
    fn non_firing_rule_is_a_no_op() {
        let store = MemoryStore::new();
        let bills_col = CollectionId::from("bills");
        let bills = BillRepository::new(&store, &bills_col);
        upsert_bill(&bills, "B-001", BillStatus::Draft);

        let final_status = StatusTransitioner::new(&bills)
            .apply(&BillNo::from("B-001"), &rollup(0, 0.0), &BillStatus::Draft)
            .unwrap();
        assert_eq!(final_status, BillStatus::Draft);
        assert_eq!(read_status(&bills, "B-001"), "Draft");
    }

    #[test]
    fn confirmed_bill_is_never_re_patched() {
        let store = MemoryStore::new();
        let bills_col = CollectionId::from("bills");
        let bills = BillRepository::new(&store, &bills_col);
        upsert_bill(&bills, "B-001", BillStatus::Confirmed);

        let final_status = StatusTransitioner::new(&bills)
            .apply(
                &BillNo::from("B-001"),
                &rollup(5, 500.0),
                &BillStatus::Confirmed,
            )
            .unwrap();
        assert_eq!(final_status, BillStatus::Confirmed);
    }

    #[test]
    fn unresolvable_bill_is_a_soft_no_op() {
        let store = MemoryStore::new();
        let bills_col = CollectionId::from("bills");
        let bills = BillRepository::new(&store, &bills_col);

        let final_status = StatusTransitioner::new(&bills)
            .apply(&BillNo::from("B-404"), &rollup(2, 150.0), &BillStatus::Draft)
            .unwrap();
        assert_eq!(final_status, BillStatus::Draft, "status unchanged, no error");
    }
}
