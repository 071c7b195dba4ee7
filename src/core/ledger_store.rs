use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    core::{
        clock::{Clock, SystemClock},
        ids::{IdGenerator, TimeOrderedIds},
    },
    errors::{LedgerError, StorageError, ValidationError},
    ledger::{
        ensure_positive, parse_amount, parse_date, Transaction, TransactionForm, TransactionKind,
    },
    storage::StorageBackend,
};

/// Key the transaction collection is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "personalFinanceTransactions";

/// Outcome of opening a ledger with the recovery policy applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub transaction_count: usize,
    /// Non-empty when persisted data could not be used and the ledger was reset.
    pub warnings: Vec<String>,
}

impl LoadReport {
    pub fn recovered(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Owns the transaction collection and keeps the persisted copy in sync.
///
/// The collection is ordered most-recent-first: every append inserts at the head.
/// Each mutation rewrites the whole collection under a single storage key.
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    key: String,
}

impl LedgerStore {
    /// Creates an empty, not yet loaded store.
    pub fn new(
        storage: Box<dyn StorageBackend>,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            transactions: Vec::new(),
            storage,
            clock,
            ids,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn with_defaults(storage: Box<dyn StorageBackend>) -> Self {
        Self::new(storage, Box::new(SystemClock), Box::new(TimeOrderedIds))
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Builds a store persisted under `key` and loads it, falling back to an
    /// empty ledger when the persisted data is unusable.
    pub fn open(
        storage: Box<dyn StorageBackend>,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
        key: impl Into<String>,
    ) -> (Self, LoadReport) {
        let mut store = Self::new(storage, clock, ids).with_key(key);
        let report = store.load_or_reset();
        (store, report)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Records a new transaction at the head of the ledger and persists the collection.
    ///
    /// Validation failures leave the ledger untouched. A
    /// [`StorageError::WriteFailure`] is returned after the transaction was
    /// added in memory; it becomes durable with the next successful write.
    pub fn append(
        &mut self,
        kind: TransactionKind,
        category: &str,
        amount: Decimal,
        description: &str,
        date: NaiveDate,
    ) -> Result<Transaction, LedgerError> {
        let amount = ensure_positive(amount)?;
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory.into());
        }

        let transaction = Transaction {
            id: self.ids.next_id(),
            kind,
            category: category.to_string(),
            amount,
            description: description.to_string(),
            date,
            created_at: self.clock.now(),
        };
        self.transactions.insert(0, transaction.clone());
        tracing::debug!(
            id = %transaction.id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            date = %transaction.date,
            "transaction appended"
        );
        self.persist()?;
        Ok(transaction)
    }

    /// Validates raw form input and appends it. A form without a date uses today.
    pub fn append_form(&mut self, form: &TransactionForm) -> Result<Transaction, LedgerError> {
        let amount = parse_amount(&form.amount)?;
        let date = match form.date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => self.clock.today(),
        };
        self.append(form.kind, &form.category, amount, &form.description, date)
    }

    /// Full collection, most recent first.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn find(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Drops every transaction and persists the empty ledger. Irreversible.
    pub fn clear(&mut self) -> Result<(), LedgerError> {
        let removed = self.transactions.len();
        self.transactions.clear();
        tracing::debug!(removed, "ledger cleared");
        self.persist()
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// Missing state yields an empty ledger. Unparseable state, or records
    /// breaking the transaction invariants, fail with
    /// [`StorageError::CorruptData`] and leave the ledger empty.
    pub fn load(&mut self) -> Result<usize, LedgerError> {
        self.transactions.clear();
        let Some(raw) = self.storage.get(&self.key)? else {
            tracing::info!(key = %self.key, "no persisted ledger, starting empty");
            return Ok(0);
        };
        let transactions = decode(&raw)?;
        self.transactions = transactions;
        tracing::info!(
            key = %self.key,
            transactions = self.transactions.len(),
            "ledger loaded"
        );
        Ok(self.transactions.len())
    }

    /// Loads the ledger, resetting to empty when the persisted state cannot be used.
    pub fn load_or_reset(&mut self) -> LoadReport {
        match self.load() {
            Ok(count) => LoadReport {
                transaction_count: count,
                warnings: Vec::new(),
            },
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "discarding persisted ledger");
                LoadReport {
                    transaction_count: 0,
                    warnings: vec![format!("{err}; starting with an empty ledger")],
                }
            }
        }
    }

    fn persist(&self) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(&self.transactions)
            .map_err(|err| StorageError::WriteFailure(err.to_string()))?;
        if let Err(err) = self.storage.set(&self.key, &json) {
            tracing::warn!(key = %self.key, error = %err, "ledger not persisted");
            return Err(err.into());
        }
        Ok(())
    }
}

fn decode(raw: &str) -> Result<Vec<Transaction>, StorageError> {
    let transactions: Vec<Transaction> =
        serde_json::from_str(raw).map_err(|err| StorageError::CorruptData(err.to_string()))?;
    for (index, txn) in transactions.iter().enumerate() {
        txn.validate().map_err(|err| {
            StorageError::CorruptData(format!("record {index} ({}): {err}", txn.id))
        })?;
    }
    Ok(transactions)
}
