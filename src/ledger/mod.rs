//! Ledger data model: transactions, their validation helpers, and period selectors.

pub mod period;
pub mod transaction;

pub use period::{PeriodMode, PeriodSelector, SELECTABLE_YEAR_SPAN};
pub use transaction::{
    amount_from_f64, ensure_positive, parse_amount, parse_date, Transaction, TransactionForm,
    TransactionKind, DATE_FORMAT,
};
