#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger records personal income and expense transactions, keeps them
//! persisted locally, and summarizes them per month or year.
//!
//! [`core::LedgerStore`] owns the transaction collection and its persisted copy;
//! [`core::PeriodAggregator`] filters that collection by a
//! [`ledger::PeriodSelector`] and derives income, expense, and balance totals.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pocket Ledger tracing initialized.");
    });
}
