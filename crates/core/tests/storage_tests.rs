// ═══════════════════════════════════════════════════════════════════
// Storage Tests: file format, StorageManager
// ═══════════════════════════════════════════════════════════════════

use activity_journal_core::errors::CoreError;
use activity_journal_core::models::activity::{Activity, ActivityType};
use activity_journal_core::services::activity_store::ActivityStore;
use activity_journal_core::storage::format::{self, FILE_NAME};
use activity_journal_core::storage::manager::StorageManager;

fn sample_store() -> ActivityStore {
    let mut store = ActivityStore::new();
    store.append(Activity::new("Go to a concert", ActivityType::Music, 2, 0.6, 0.4));
    store.append(
        Activity::new("Learn calligraphy", ActivityType::Education, 1, 0.1, 0.1)
            .with_link("https://calligraphy.example"),
    );
    store
}

// ═══════════════════════════════════════════════════════════════════
// Format
// ═══════════════════════════════════════════════════════════════════

mod file_format {
    use super::*;

    #[test]
    fn encodes_json_array_top_first() {
        let store = sample_store();
        let bytes = format::encode(&store.activities()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["activity"], "Learn calligraphy");
        assert_eq!(arr[0]["link"], "https://calligraphy.example");
        assert_eq!(arr[1]["activity"], "Go to a concert");
        assert!(arr[1]["link"].is_null());
    }

    #[test]
    fn decodes_hand_written_file() {
        let data = br#"[
            {"activity":"Paint","type":"diy","participants":1,"price":0.2,"accessibility":0.3,"link":null},
            {"activity":"Cook","type":"cooking","participants":2,"price":0.4,"accessibility":0.1,"link":"https://x.y"}
        ]"#;
        let activities = format::decode(data).unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].activity_type, ActivityType::Diy);
        assert_eq!(activities[1].link.as_deref(), Some("https://x.y"));
    }

    #[test]
    fn blank_file_is_empty_list() {
        assert!(format::decode(b"").unwrap().is_empty());
        assert!(format::decode(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn truncated_file_is_error() {
        let err = format::decode(br#"[{"activity":"Paint","type":"d"#).unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let data = br#"[{"activity":"X","type":"music","participants":0,"price":7.5,"accessibility":-3.0,"link":null}]"#;
        let err = format::decode(data).unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
        assert!(ActivityStore::load(data).is_err());
    }

    #[test]
    fn price_above_one_is_rejected() {
        let data = br#"[{"activity":"Yacht","type":"recreational","participants":2,"price":1.5,"accessibility":0.3,"link":null}]"#;
        let err = format::decode(data).unwrap_err();
        match err {
            CoreError::Deserialization(msg) => assert!(msg.contains("price")),
            other => panic!("expected Deserialization, got {other:?}"),
        }
    }

    #[test]
    fn range_edges_are_accepted() {
        let data = br#"[{"activity":"Nap","type":"relaxation","participants":1,"price":0.0,"accessibility":1.0,"link":null}]"#;
        assert_eq!(format::decode(data).unwrap().len(), 1);
    }

    #[test]
    fn unknown_category_is_error() {
        let data = br#"[{"activity":"Fly","type":"aviation","participants":1,"price":0.2,"accessibility":0.3,"link":null}]"#;
        assert!(format::decode(data).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// StorageManager
// ═══════════════════════════════════════════════════════════════════

mod manager {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::in_dir(dir.path());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::in_dir(dir.path());
        let store = sample_store();
        storage.save(&store).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.activities(), store.activities());
    }

    #[test]
    fn file_lands_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::in_dir(dir.path());
        assert_eq!(storage.path(), dir.path().join(FILE_NAME));
        storage.save(&sample_store()).unwrap();
        assert!(dir.path().join(FILE_NAME).exists());
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = StorageManager::in_dir(&nested);
        storage.save(&sample_store()).unwrap();
        assert!(nested.join(FILE_NAME).exists());
    }

    #[test]
    fn save_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::in_dir(dir.path());
        storage.save(&sample_store()).unwrap();

        let mut smaller = ActivityStore::new();
        smaller.append(Activity::new("Only one", ActivityType::Social, 3, 0.0, 0.2));
        storage.save(&smaller).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.items()[0].activity.name, "Only one");
    }

    #[test]
    fn corrupted_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FILE_NAME), b"{not json").unwrap();
        let err = StorageManager::in_dir(dir.path()).load().unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn unwritable_location_is_file_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the data directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let storage = StorageManager::in_dir(&blocker.join("sub"));
        let err = storage.save(&sample_store()).unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }
}
