// On-disk snapshots of the inventory store
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::HotelConfig;
use crate::error::{PersistenceError, Result};
use crate::inventory::InventoryStore;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    saved_at: DateTime<Utc>,
    store: InventoryStore,
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(config: &HotelConfig) -> Self {
        Self::at(config.snapshot_path.clone())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restores the last saved store. A missing or unusable snapshot is a
    /// cold start, not an error: the caller gets a fully vacant store.
    pub fn load(&self) -> InventoryStore {
        match self.read() {
            Ok(store) => {
                info!(
                    path = %self.path.display(),
                    occupied = store.occupied().count(),
                    "snapshot loaded"
                );
                store
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "starting with a fresh store");
                InventoryStore::new()
            }
        }
    }

    fn read(&self) -> std::result::Result<InventoryStore, SnapshotReadError> {
        let raw = fs::read_to_string(&self.path).map_err(PersistenceError::from)?;
        let file: SnapshotFile = serde_json::from_str(&raw).map_err(PersistenceError::from)?;
        if file.version != SNAPSHOT_VERSION {
            return Err(SnapshotReadError::Version(file.version));
        }
        if !file.store.is_well_formed() {
            return Err(SnapshotReadError::Layout);
        }
        Ok(file.store)
    }

    /// Writes the whole store. The previous snapshot is only replaced once
    /// the new one is fully on disk.
    pub fn save(&self, store: &InventoryStore) -> Result<()> {
        let file = SnapshotFile {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            store: store.clone(),
        };
        let encoded = serde_json::to_vec_pretty(&file)?;

        let tmp_path = self.tmp_path();
        if let Err(err) = self.replace_with(&tmp_path, &encoded) {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                warn!(path = %tmp_path.display(), error = %cleanup, "temp snapshot left behind");
            }
            return Err(err.into());
        }

        info!(path = %self.path.display(), bytes = encoded.len(), "snapshot saved");
        Ok(())
    }

    fn replace_with(&self, tmp_path: &Path, encoded: &[u8]) -> std::io::Result<()> {
        let mut tmp = fs::File::create(tmp_path)?;
        tmp.write_all(encoded)?;
        tmp.sync_all()?;
        drop(tmp);
        fs::rename(tmp_path, &self.path)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[derive(thiserror::Error, Debug)]
enum SnapshotReadError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Unsupported snapshot version {0}")]
    Version(u32),

    #[error("Snapshot does not match the room layout")]
    Layout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BookingEngine;
    use crate::error::HotelError;
    use crate::room::{Guest, RoomCategory};

    fn populated_store() -> InventoryStore {
        let mut engine = BookingEngine::default();
        engine
            .book(
                RoomCategory::LuxuryDouble,
                4,
                Guest::new("Arjun", "555-1000", "M"),
                Some(Guest::new("Priya", "555-1001", "F")),
            )
            .unwrap();
        engine
            .book(RoomCategory::DeluxeSingle, 19, Guest::new("Lena", "555-2000", "F"), None)
            .unwrap();
        engine.add_food_order(RoomCategory::LuxuryDouble, 4, 3, 2).unwrap();
        engine.add_food_order(RoomCategory::LuxuryDouble, 4, 1, 1).unwrap();
        engine.add_food_order(RoomCategory::DeluxeSingle, 19, 4, 4).unwrap();
        engine.into_store()
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::at(dir.path().join("hotel.json"));
        let store = populated_store();

        snapshots.save(&store).unwrap();
        let restored = snapshots.load();

        assert_eq!(restored, store);
        assert_eq!(restored.available_count(RoomCategory::LuxuryDouble), 9);
        let (_, booking) = restored.occupied().next().unwrap();
        let items: Vec<u8> = booking.orders.iter().map(|o| o.item.id()).collect();
        assert_eq!(items, vec![3, 1]);
        assert!(!dir.path().join("hotel.json.tmp").exists());
    }

    #[test]
    fn test_missing_snapshot_is_cold_start() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::at(dir.path().join("absent.json"));
        assert_eq!(snapshots.load(), InventoryStore::new());
    }

    #[test]
    fn test_corrupt_snapshot_is_cold_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotel.json");
        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(SnapshotStore::at(&path).load(), InventoryStore::new());
    }

    #[test]
    fn test_wrong_version_is_cold_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotel.json");
        let snapshots = SnapshotStore::at(&path);
        snapshots.save(&populated_store()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        value["version"] = serde_json::json!(SNAPSHOT_VERSION + 1);
        fs::write(&path, value.to_string()).unwrap();

        assert_eq!(snapshots.load(), InventoryStore::new());
    }

    #[test]
    fn test_wrong_layout_is_cold_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotel.json");
        let snapshots = SnapshotStore::at(&path);
        snapshots.save(&populated_store()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        value["store"]["slots"]["DeluxeSingle"]
            .as_array_mut()
            .unwrap()
            .truncate(3);
        fs::write(&path, value.to_string()).unwrap();

        assert_eq!(snapshots.load(), InventoryStore::new());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the final rename fail
        let path = dir.path().join("hotel.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"x").unwrap();

        let result = SnapshotStore::at(&path).save(&populated_store());
        assert!(matches!(
            result,
            Err(HotelError::Persistence(PersistenceError::Io(_)))
        ));
        assert!(!dir.path().join("hotel.json.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::at(dir.path().join("missing-dir").join("hotel.json"));
        let result = snapshots.save(&InventoryStore::new());
        assert!(matches!(
            result,
            Err(HotelError::Persistence(PersistenceError::Io(_)))
        ));
    }
}
