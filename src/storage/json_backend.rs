use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::errors::StorageError;

use super::{Result, StorageBackend};

const BLOB_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed storage keeping one `<key>.json` file per key under a root directory.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root).map_err(|err| {
            StorageError::WriteFailure(format!("cannot create `{}`: {err}", root.display()))
        })?;
        Ok(Self { root })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(key), BLOB_EXTENSION))
    }
}

impl StorageBackend for JsonStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::ReadFailure(format!(
                "`{}`: {err}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|err| StorageError::WriteFailure(format!("`{}`: {err}", path.display())))?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "ledger blob written");
        Ok(())
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().join("data")).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (storage, _guard) = storage_with_temp_dir();
        assert_eq!(storage.get("personalFinanceTransactions").unwrap(), None);
    }

    #[test]
    fn set_then_get_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.set("ledger", "[]").expect("write blob");
        assert_eq!(storage.get("ledger").unwrap().as_deref(), Some("[]"));

        storage.set("ledger", "[1]").expect("overwrite blob");
        assert_eq!(storage.get("ledger").unwrap().as_deref(), Some("[1]"));
        assert!(!tmp_path(&storage.blob_path("ledger")).exists());
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        let (storage, _guard) = storage_with_temp_dir();
        let path = storage.blob_path("Personal Finance/Transactions");
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("personal_finance_transactions.json")
        );
        assert_eq!(
            storage
                .blob_path("??")
                .file_name()
                .and_then(|name| name.to_str()),
            Some("ledger.json")
        );
    }

    #[test]
    fn failed_write_keeps_previous_blob() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.set("ledger", "[\"first\"]").expect("initial write");

        // A directory at the temp path makes File::create fail.
        let tmp = tmp_path(&storage.blob_path("ledger"));
        fs::create_dir_all(&tmp).unwrap();

        let err = storage.set("ledger", "[\"second\"]").unwrap_err();
        assert!(matches!(err, StorageError::WriteFailure(_)));
        assert_eq!(
            storage.get("ledger").unwrap().as_deref(),
            Some("[\"first\"]")
        );
    }
}
