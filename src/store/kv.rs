// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error for key '{key}': {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid storage key '{key}'")]
    InvalidKey { key: String },
}

/// Durable string key-value storage.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store, lost on exit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryKv {
    entries: BTreeMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Temp file plus atomic rename, no fsync.
    #[default]
    BestEffort,

    /// Also syncs the file contents and, on unix, the containing directory.
    ///
    /// Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// One `<key>.json` file per key inside a directory. The directory is created on first write.
#[derive(Debug, Clone)]
pub struct DirKv {
    root: PathBuf,
    durability: WriteDurability,
}

impl DirKv {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KvStore for DirKv {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)
            .map_err(|source| StoreError::Io { path: self.root.clone(), source })?;
        write_atomic(&path, value.as_bytes(), self.durability)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "stored key");
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey { key: key.to_owned() })
    }
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path = parent.join(format!(".medflow.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;

    if let Err(source) = file.write_all(contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: tmp_path, source });
    }

    if durability == WriteDurability::Durable {
        if let Err(source) = file.sync_all() {
            drop(file);
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io { path: tmp_path, source });
        }
    }
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: path.to_path_buf(), source });
    }

    // Contents are in place once renamed; a failed directory sync is only logged.
    if durability == WriteDurability::Durable {
        if let Err(err) = sync_dir(parent) {
            tracing::warn!(path = %parent.display(), error = %err, "directory sync failed after write");
        }
    }

    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DirKv, KvStore, MemoryKv, StoreError, WriteDurability};
    use crate::test_utils::TempDir;

    #[test]
    fn memory_kv_round_trips() {
        let mut kv = MemoryKv::new();
        assert_eq!(kv.get("a").unwrap(), None);
        kv.set("a", "1").unwrap();
        kv.set("a", "2").unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("2"));
    }

    #[rstest]
    #[case(WriteDurability::BestEffort)]
    #[case(WriteDurability::Durable)]
    fn dir_kv_creates_directory_and_overwrites(#[case] durability: WriteDurability) {
        let tmp = TempDir::new("dir-kv");
        let mut kv = DirKv::new(tmp.path().join("nested")).with_durability(durability);

        assert_eq!(kv.get("medflow.bookmarks").unwrap(), None);
        kv.set("medflow.bookmarks", "[]").unwrap();
        kv.set("medflow.bookmarks", "[\"cpr:start_cpr\"]").unwrap();

        assert_eq!(kv.get("medflow.bookmarks").unwrap().as_deref(), Some("[\"cpr:start_cpr\"]"));
        let leftovers = std::fs::read_dir(kv.root())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(".medflow.tmp."))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[rstest]
    #[case("")]
    #[case("..")]
    #[case("../escape")]
    #[case("a/b")]
    fn dir_kv_rejects_path_like_keys(#[case] key: &str) {
        let tmp = TempDir::new("dir-kv-keys");
        let mut kv = DirKv::new(tmp.path());
        assert!(matches!(kv.set(key, "x"), Err(StoreError::InvalidKey { .. })));
        assert!(matches!(kv.get(key), Err(StoreError::InvalidKey { .. })));
    }

    #[test]
    fn sync_dir_reports_missing_directory() {
        let tmp = TempDir::new("dir-kv-sync");
        assert!(super::sync_dir(tmp.path()).is_ok());
        #[cfg(unix)]
        assert!(super::sync_dir(&tmp.path().join("gone")).is_err());
    }

    #[test]
    fn dir_kv_reports_unwritable_root() {
        let tmp = TempDir::new("dir-kv-file-root");
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "not a dir").unwrap();

        let mut kv = DirKv::new(&blocker);
        assert!(matches!(kv.set("key", "x"), Err(StoreError::Io { .. })));
    }
}
