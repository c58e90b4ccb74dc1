//! # Store Snapshot
//!
//! The whole store is persisted as one JSON document under
//! [`bistro_core::STORAGE_KEY`]. Saving overwrites the previous snapshot;
//! loading replaces the in-memory store. There is no merge step and no
//! partial update.
//!
//! ```text
//!   save_state ──► serde_json::to_string(&state) ──► set_item(KEY, json)
//!
//!   hydrate    ──► get_item(KEY)
//!                    ├── None            → demo_state()
//!                    ├── Some(valid)     → parsed state
//!                    └── Some(corrupt)   → warn, demo_state()
//! ```
//!
//! Transient fields (weather, tables, loading flag, error string, tax rate)
//! are `#[serde(skip)]` on `RestaurantState` and never reach storage.

use bistro_core::seed::demo_state;
use bistro_core::{RestaurantState, STORAGE_KEY};
use tracing::{info, warn};

use crate::error::DbResult;
use crate::repository::local_storage::LocalStorageRepository;

/// Serializes the persisted part of the store.
pub fn serialize_state(state: &RestaurantState) -> DbResult<String> {
    Ok(serde_json::to_string(state)?)
}

/// Writes the store snapshot, replacing the previous one.
pub async fn save_state(repo: &LocalStorageRepository, state: &RestaurantState) -> DbResult<()> {
    let json = serialize_state(state)?;
    save_raw(repo, &json).await
}

/// Writes an already-serialized snapshot.
pub async fn save_raw(repo: &LocalStorageRepository, json: &str) -> DbResult<()> {
    repo.set_item(STORAGE_KEY, json).await
}

/// Reads the store snapshot. `Ok(None)` when nothing has been saved yet.
pub async fn load_state(repo: &LocalStorageRepository) -> DbResult<Option<RestaurantState>> {
    match repo.get_item(STORAGE_KEY).await? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Loads the snapshot for startup, falling back to the demo store when
/// there is none or it cannot be parsed. Storage errors still propagate.
pub async fn hydrate(repo: &LocalStorageRepository) -> DbResult<RestaurantState> {
    let Some(json) = repo.get_item(STORAGE_KEY).await? else {
        info!("No stored snapshot, starting from demo data");
        return Ok(demo_state());
    };

    match serde_json::from_str::<RestaurantState>(&json) {
        Ok(state) => {
            info!(
                reservations = state.reservations.len(),
                orders = state.orders.len(),
                menu_items = state.menu_items.len(),
                "Store hydrated from snapshot"
            );
            Ok(state)
        }
        Err(e) => {
            warn!(error = %e, bytes = json.len(), "Stored snapshot is unreadable, starting from demo data");
            Ok(demo_state())
        }
    }
}

/// Deletes the snapshot. The next start uses demo data.
pub async fn clear_state(repo: &LocalStorageRepository) -> DbResult<bool> {
    repo.remove_item(STORAGE_KEY).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use bistro_core::{NewReservation, RestaurantState};
    use chrono::{Duration, NaiveTime, Utc};

    async fn repo() -> LocalStorageRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .local_storage()
    }

    fn store_with_reservation() -> RestaurantState {
        let mut store = RestaurantState::default();
        store
            .add_reservation(NewReservation {
                customer_name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                phone: "+44 20 7946 0958".into(),
                date: (Utc::now() + Duration::days(2)).date_naive(),
                time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
                party_size: 2,
                table_preference: None,
                occasion: Some("anniversary".into()),
                special_requests: None,
                member_id: None,
            })
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let repo = repo().await;
        let mut store = store_with_reservation();
        store.set_error("transient");
        store.set_available_tables(2);

        save_state(&repo, &store).await.unwrap();
        let loaded = load_state(&repo).await.unwrap().unwrap();

        assert_eq!(loaded.reservations, store.reservations);
        assert_eq!(loaded.notifications, store.notifications);
        assert!(loaded.error.is_none());
        assert_eq!(loaded.tables.available, loaded.tables.total);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_snapshot() {
        let repo = repo().await;
        save_state(&repo, &store_with_reservation()).await.unwrap();
        save_state(&repo, &RestaurantState::default()).await.unwrap();

        let loaded = load_state(&repo).await.unwrap().unwrap();
        assert!(loaded.reservations.is_empty());
        assert_eq!(repo.keys().await.unwrap(), vec![STORAGE_KEY.to_string()]);
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let repo = repo().await;
        assert!(load_state(&repo).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_hydrate_falls_back_on_corrupt_snapshot() {
        let repo = repo().await;
        repo.set_item(STORAGE_KEY, "{\"menuItems\": 42").await.unwrap();

        assert!(load_state(&repo).await.is_err());
        let state = hydrate(&repo).await.unwrap();
        assert!(!state.menu_items.is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_prefers_snapshot() {
        let repo = repo().await;
        save_state(&repo, &store_with_reservation()).await.unwrap();

        let state = hydrate(&repo).await.unwrap();
        assert_eq!(state.reservations.len(), 1);
        assert!(state.menu_items.is_empty());

        assert!(clear_state(&repo).await.unwrap());
        assert!(!hydrate(&repo).await.unwrap().menu_items.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bistro.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        save_state(&db.local_storage(), &store_with_reservation())
            .await
            .unwrap();
        db.close().await;

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let loaded = load_state(&db.local_storage()).await.unwrap().unwrap();
        assert_eq!(loaded.reservations.len(), 1);
        assert_eq!(loaded.reservations[0].occasion.as_deref(), Some("anniversary"));
    }
}
