//! Ledger state, collaborators it consumes, and the services computed over it.

pub mod clock;
pub mod ids;
pub mod ledger_store;
pub mod services;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::{IdGenerator, SequentialIds, TimeOrderedIds};
pub use ledger_store::{LedgerStore, LoadReport, DEFAULT_STORAGE_KEY};
pub use services::{BalanceStanding, PeriodAggregator, PeriodReport, PeriodSummary, TypeTotal};
