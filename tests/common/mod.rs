#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use pocket_ledger::{
    core::{FixedClock, LedgerStore, SequentialIds, TimeOrderedIds},
    storage::JsonStorage,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique data directory that outlives the calling test.
pub fn temp_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Store over JSON files in `dir`, clock frozen on 2024-01-20.
pub fn json_store(dir: &Path) -> LedgerStore {
    let storage = JsonStorage::new(dir.join("data")).expect("create json storage backend");
    LedgerStore::new(
        Box::new(storage),
        Box::new(FixedClock::on(date(2024, 1, 20))),
        Box::new(TimeOrderedIds),
    )
}

/// Isolated store backed by a fresh directory, with deterministic ids.
pub fn setup_test_store() -> (LedgerStore, PathBuf) {
    let base = temp_data_dir();
    let storage = JsonStorage::new(base.join("data")).expect("create json storage backend");
    let store = LedgerStore::new(
        Box::new(storage),
        Box::new(FixedClock::on(date(2024, 1, 20))),
        Box::new(SequentialIds::default()),
    );
    (store, base)
}
