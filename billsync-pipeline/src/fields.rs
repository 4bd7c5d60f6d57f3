//! Field names of the two remote collections.
//!
//! These are the column names the collections are provisioned with; the
//! rollup columns are optional — a workspace without them simply reports
//! zero aggregates (see [`crate::rollups`]).

/// Title/key field of the Bill collection — the natural-key lookup target.
pub const BILL_NO: &str = "Bill No";
pub const BILL_DATE: &str = "Bill Date";
pub const CUSTOMER: &str = "Customer";
pub const STATUS: &str = "Status";

/// Relation on an item pointing at its parent Bill.
pub const PARENT_BILL: &str = "Parent Bill";
pub const ITEM_TYPE: &str = "Type";
pub const ITEM_NUMBER: &str = "Number";
pub const AMOUNT: &str = "Amount";

/// Server-computed rollup over related items (count).
pub const ITEMS_COUNT: &str = "Items Count";
/// Server-computed rollup over related items (amount sum).
pub const TOTAL_AMOUNT: &str = "Total Amount";
