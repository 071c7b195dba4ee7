use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    errors::ValidationError,
    ledger::{PeriodSelector, Transaction, TransactionKind},
};

/// Income, expense, and balance over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

impl PeriodSummary {
    pub fn standing(&self) -> BalanceStanding {
        if self.balance > Decimal::ZERO {
            BalanceStanding::Surplus
        } else if self.balance < Decimal::ZERO {
            BalanceStanding::Deficit
        } else {
            BalanceStanding::Even
        }
    }
}

/// Sign of a balance, for callers that present surpluses and deficits differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceStanding {
    Surplus,
    Deficit,
    Even,
}

/// Sum and number of transactions of one kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTotal {
    pub sum: Decimal,
    pub count: usize,
}

/// Everything a period view needs in one pass over the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodReport<'a> {
    pub selector: PeriodSelector,
    pub transactions: Vec<&'a Transaction>,
    pub summary: PeriodSummary,
    pub income: TypeTotal,
    pub expense: TypeTotal,
}

/// Stateless filtering and aggregation over a transaction collection.
pub struct PeriodAggregator;

impl PeriodAggregator {
    /// Transactions dated inside the selected period, in input order.
    pub fn filter<'a>(
        transactions: &'a [Transaction],
        selector: &PeriodSelector,
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|txn| selector.contains(txn.date))
            .collect()
    }

    /// Income and expense totals with their difference. Fails with
    /// [`ValidationError::AmountOverflow`] when a sum leaves the decimal range.
    pub fn summarize<'a, I>(transactions: I) -> Result<PeriodSummary, ValidationError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = PeriodSummary::default();
        for txn in transactions {
            let total = match txn.kind {
                TransactionKind::Income => &mut summary.total_income,
                TransactionKind::Expense => &mut summary.total_expense,
            };
            *total = checked_sum(*total, txn.amount)?;
        }
        summary.balance = summary
            .total_income
            .checked_sub(summary.total_expense)
            .ok_or(ValidationError::AmountOverflow)?;
        Ok(summary)
    }

    pub fn total_by_type<'a, I>(
        transactions: I,
        kind: TransactionKind,
    ) -> Result<TypeTotal, ValidationError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .filter(|txn| txn.kind == kind)
            .try_fold(TypeTotal::default(), |total, txn| {
                Ok(TypeTotal {
                    sum: checked_sum(total.sum, txn.amount)?,
                    count: total.count + 1,
                })
            })
    }

    pub fn summarize_period<'a>(
        transactions: &'a [Transaction],
        selector: &PeriodSelector,
    ) -> Result<PeriodReport<'a>, ValidationError> {
        let filtered = Self::filter(transactions, selector);
        let summary = Self::summarize(filtered.iter().copied())?;
        let income = Self::total_by_type(filtered.iter().copied(), TransactionKind::Income)?;
        let expense = Self::total_by_type(filtered.iter().copied(), TransactionKind::Expense)?;
        Ok(PeriodReport {
            selector: *selector,
            transactions: filtered,
            summary,
            income,
            expense,
        })
    }
}

fn checked_sum(total: Decimal, amount: Decimal) -> Result<Decimal, ValidationError> {
    total
        .checked_add(amount)
        .ok_or(ValidationError::AmountOverflow)
}
