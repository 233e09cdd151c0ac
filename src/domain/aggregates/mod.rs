//! Aggregates - Consistency boundaries over domain entities

mod prestige_ledger;

pub use prestige_ledger::PrestigeLedger;
