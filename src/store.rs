use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::StudentRecord;

/// Load/save seam for the roster. The daemon uses [`FileStorage`]; tests can
/// substitute an in-memory fake so record-store behavior is checked without
/// touching a real path.
pub trait Storage {
    fn load(&self) -> anyhow::Result<Vec<StudentRecord>>;
    fn save(&self, records: &[StudentRecord]) -> anyhow::Result<()>;
}

/// The roster lives in a single JSON file holding an array of records,
/// pretty-printed with 4-space indent. A missing file is created as an empty
/// array on first load.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> anyhow::Result<Vec<StudentRecord>> {
        if !self.path.exists() {
            self.save(&[])?;
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read roster file {}", self.path.display()))?;
        serde_json::from_str(&text).with_context(|| {
            format!(
                "roster file {} is not a valid record array",
                self.path.display()
            )
        })
    }

    fn save(&self, records: &[StudentRecord]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create directory {}", parent.display())
                })?;
            }
        }

        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        serde::Serialize::serialize(records, &mut ser).context("failed to serialize roster")?;

        // Write the whole array to a sibling temp file and rename it over the
        // target so a crash mid-write cannot leave a truncated roster behind.
        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "roster".into());
        tmp_name.push(".saving");
        let tmp = self.path.with_file_name(tmp_name);

        fs::write(&tmp, &buf)
            .with_context(|| format!("failed to write temp roster file {}", tmp.display()))?;
        fs::rename(&tmp, &self.path).with_context(|| {
            format!("failed to move roster into place at {}", self.path.display())
        })?;
        Ok(())
    }
}

/// Convenience mutators over a [`Storage`]. Every call is a full
/// load-mutate-save round trip; nothing is cached between calls, so the file
/// is always the source of truth.
pub struct RecordStore<S: Storage> {
    storage: S,
}

impl<S: Storage> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn list(&self) -> anyhow::Result<Vec<StudentRecord>> {
        self.storage.load()
    }

    pub fn append(&self, record: StudentRecord) -> anyhow::Result<usize> {
        let mut records = self.storage.load()?;
        records.push(record);
        self.storage.save(&records)?;
        Ok(records.len())
    }

    /// Replaces the record at `index`. Returns `Ok(false)` without writing
    /// anything when the index is out of bounds.
    pub fn replace_at(&self, index: usize, record: StudentRecord) -> anyhow::Result<bool> {
        let mut records = self.storage.load()?;
        let Some(slot) = records.get_mut(index) else {
            return Ok(false);
        };
        *slot = record;
        self.storage.save(&records)?;
        Ok(true)
    }

    /// Removes the record at `index`, preserving the relative order of the
    /// rest. Returns `Ok(false)` without writing when the index is out of
    /// bounds.
    pub fn remove_at(&self, index: usize) -> anyhow::Result<bool> {
        let mut records = self.storage.load()?;
        if index >= records.len() {
            return Ok(false);
        }
        records.remove(index);
        self.storage.save(&records)?;
        Ok(true)
    }

    pub fn find_by_national_id(
        &self,
        id: &str,
    ) -> anyhow::Result<Option<(usize, StudentRecord)>> {
        let records = self.storage.load()?;
        Ok(records
            .into_iter()
            .enumerate()
            .find(|(_, r)| r.national_id == id))
    }

    /// Reorders the roster by name and persists the new order. Plain
    /// case-sensitive byte comparison, matching how the roster has always
    /// sorted; no locale normalization.
    pub fn sort_by_name(&self, ascending: bool) -> anyhow::Result<Vec<StudentRecord>> {
        let mut records = self.storage.load()?;
        if ascending {
            records.sort_by(|a, b| a.name.cmp(&b.name));
        } else {
            records.sort_by(|a, b| b.name.cmp(&a.name));
        }
        self.storage.save(&records)?;
        Ok(records)
    }
}
