//! Local persistence of the baseline record.

use crate::{BlockRecord, MonitorResult};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Reads and writes the locally persisted baseline.
///
/// The state file is a single JSON object. Writes are not atomic: a crash
/// mid-write can corrupt the file, which is tolerable for a monitoring cache
/// that rebuilds itself on the next scheduled run.
#[derive(Debug, Clone)]
pub struct StateStore {
    /// Path of the JSON state file.
    path: PathBuf,
}

impl StateStore {
    /// Creates a store backed by the file at `path`.
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the persisted baseline.
    ///
    /// A missing file is the cold-start case and yields `Ok(None)`. Malformed
    /// contents are a decode error, kept distinct from the absent-file case.
    pub fn load(&self) -> MonitorResult<Option<BlockRecord>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    /// Persists `record` as the new baseline, truncating any prior contents.
    pub fn save(&self, record: &BlockRecord) -> MonitorResult<()> {
        let raw = serde_json::to_vec(record)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// The path of the underlying state file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonitorError;
    use chrono::{TimeZone, Utc};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_missing_file_is_cold_start() {
        let tmp_dir = TempDir::new().unwrap();
        let store = StateStore::new(tmp_dir.path().join("latest.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_load_malformed_file_is_decode_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"number\": ").unwrap();

        let store = StateStore::new(file.path().to_path_buf());
        assert!(matches!(store.load().unwrap_err(), MonitorError::Decode(_)));
    }

    #[test]
    fn test_save_then_load() {
        let tmp_dir = TempDir::new().unwrap();
        let store = StateStore::new(tmp_dir.path().join("latest.json"));
        let record = BlockRecord::new(
            "0x1b4".to_string(),
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        );

        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), Some(record));
    }

    #[test]
    fn test_save_truncates_previous_contents() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("latest.json");
        fs::write(&path, vec![b' '; 4096]).unwrap();

        let store = StateStore::new(path.clone());
        let record = BlockRecord::new(
            "0x2".to_string(),
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        );
        store.save(&record).unwrap();

        let raw = fs::read(&path).unwrap();
        let parsed: BlockRecord = serde_json::from_slice(&raw).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let tmp_dir = TempDir::new().unwrap();
        let store = StateStore::new(tmp_dir.path().join("missing").join("latest.json"));
        let record = BlockRecord::new("0x1".to_string(), Utc::now());
        assert!(matches!(store.save(&record).unwrap_err(), MonitorError::Io(_)));
    }
}
