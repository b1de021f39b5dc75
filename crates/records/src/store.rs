//! Generic collection repository.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use envoy_core::records::{
    ContactRequest, ContactStatus, ContentItem, ContentType, NavigationItem, User,
};
use envoy_core::types::DbId;
use envoy_events::{Change, EventBus};

use crate::error::{StoreError, StoreResult};
use crate::persistence::Persistence;
use crate::record::Record;

/// Repository for one collection of `T`.
///
/// The collection lives as a JSON array under `T::STORAGE_KEY`. Ids come
/// from a monotonic counter kept under `<key>:next-id`; the counter never
/// falls below `max(id) + 1`, so ids are not reused after deletes.
///
/// Mutations hold an internal lock for their read-modify-write cycle, so
/// concurrent callers in one process cannot lose each other's writes.
pub struct RecordStore<T: Record> {
    persistence: Arc<dyn Persistence>,
    bus: Arc<EventBus>,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> RecordStore<T> {
    pub fn new(persistence: Arc<dyn Persistence>, bus: Arc<EventBus>) -> Self {
        Self {
            persistence,
            bus,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    fn counter_key() -> String {
        format!("{}:next-id", T::STORAGE_KEY)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Every record, or the collection's seed when nothing was persisted yet.
    pub fn get_all(&self) -> StoreResult<Vec<T>> {
        match self.persistence.load(T::STORAGE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Serialization {
                key: T::STORAGE_KEY.to_string(),
                source,
            }),
            None => Ok(T::seed(Utc::now())),
        }
    }

    pub fn get_by_id(&self, id: DbId) -> StoreResult<Option<T>> {
        Ok(self.get_all()?.into_iter().find(|r| r.id() == id))
    }

    /// Records matching `predicate`, in stored order.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> StoreResult<Vec<T>> {
        Ok(self.get_all()?.into_iter().filter(|r| predicate(r)).collect())
    }

    /// First record matching `predicate`.
    pub fn find_first(&self, predicate: impl Fn(&T) -> bool) -> StoreResult<Option<T>> {
        Ok(self.get_all()?.into_iter().find(|r| predicate(r)))
    }

    /// Validate, assign an id, append and persist a new record.
    pub fn add(&self, new: T::New) -> StoreResult<T> {
        T::validate_new(&new)?;
        let _guard = self.lock();

        let mut records = self.get_all()?;
        let id = self.allocate_id(&records)?;
        let record = T::create(id, new, &records, Utc::now());
        record.check_unique(&records)?;
        records.push(record.clone());
        self.write(&records)?;

        tracing::debug!(entity = T::ENTITY, id, "Record added");
        self.bus.publish(T::event(Change::Added(record.clone())));
        Ok(record)
    }

    /// Merge `patch` into the record with `id`. Returns `None` if absent.
    pub fn update(&self, id: DbId, patch: T::Patch) -> StoreResult<Option<T>> {
        T::validate_patch(&patch)?;
        let _guard = self.lock();

        let mut records = self.get_all()?;
        let Some(position) = records.iter().position(|r| r.id() == id) else {
            tracing::debug!(entity = T::ENTITY, id, "Update skipped, record not found");
            return Ok(None);
        };
        let mut updated = records[position].clone();
        updated.apply(patch, Utc::now());
        updated.check_unique(&records)?;
        records[position] = updated.clone();
        self.write(&records)?;

        tracing::debug!(entity = T::ENTITY, id, "Record updated");
        self.bus.publish(T::event(Change::Updated(updated.clone())));
        Ok(Some(updated))
    }

    /// Remove the record with `id`. Returns `false`, without writing, if
    /// nothing matched.
    pub fn delete(&self, id: DbId) -> StoreResult<bool> {
        let _guard = self.lock();

        let mut records = self.get_all()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write(&records)?;

        tracing::debug!(entity = T::ENTITY, id, "Record deleted");
        self.bus.publish(T::event(Change::Deleted(id)));
        Ok(true)
    }

    /// Replace the whole collection, e.g. when restoring an export.
    ///
    /// Publishes no per-record events; the id counter is raised past the
    /// imported ids.
    pub fn replace_all(&self, records: Vec<T>) -> StoreResult<()> {
        let _guard = self.lock();
        let floor = records.iter().map(T::id).max().unwrap_or(0) + 1;
        if self.read_counter()?.unwrap_or(0) < floor {
            self.persistence.save(&Self::counter_key(), &floor.to_string())?;
        }
        self.write(&records)?;
        tracing::info!(entity = T::ENTITY, count = records.len(), "Collection replaced");
        Ok(())
    }

    fn read_counter(&self) -> StoreResult<Option<DbId>> {
        Ok(self
            .persistence
            .load(&Self::counter_key())?
            .and_then(|raw| raw.trim().parse().ok()))
    }

    fn allocate_id(&self, records: &[T]) -> StoreResult<DbId> {
        let floor = records.iter().map(T::id).max().unwrap_or(0) + 1;
        let id = self.read_counter()?.map_or(floor, |next| next.max(floor));
        self.persistence
            .save(&Self::counter_key(), &(id + 1).to_string())?;
        Ok(id)
    }

    fn write(&self, records: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string(records).map_err(|source| StoreError::Serialization {
            key: T::STORAGE_KEY.to_string(),
            source,
        })?;
        self.persistence.save(T::STORAGE_KEY, &raw)
    }
}

// ---------------------------------------------------------------------------
// Field lookups
// ---------------------------------------------------------------------------

impl RecordStore<ContentItem> {
    pub fn get_by_slug(&self, slug: &str) -> StoreResult<Option<ContentItem>> {
        self.find_first(|c| c.slug == slug)
    }

    pub fn get_by_type(&self, content_type: &ContentType) -> StoreResult<Vec<ContentItem>> {
        self.find(|c| &c.content_type == content_type)
    }
}

impl RecordStore<NavigationItem> {
    pub fn get_by_path(&self, path: &str) -> StoreResult<Option<NavigationItem>> {
        self.find_first(|n| n.path == path)
    }

    /// Entries sorted by `order`, as the site renders them.
    pub fn ordered(&self) -> StoreResult<Vec<NavigationItem>> {
        let mut items = self.get_all()?;
        items.sort_by_key(|n| n.order);
        Ok(items)
    }
}

impl RecordStore<User> {
    pub fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = email.to_lowercase();
        self.find_first(|u| u.email == email)
    }
}

impl RecordStore<ContactRequest> {
    pub fn get_by_status(&self, status: ContactStatus) -> StoreResult<Vec<ContactRequest>> {
        self.find(|c| c.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPersistence;
    use assert_matches::assert_matches;
    use envoy_core::error::CoreError;
    use envoy_core::records::{NewUser, UserPatch, UserRole};
    use envoy_events::SiteEvent;

    fn user_store() -> (RecordStore<User>, Arc<MemoryPersistence>, Arc<EventBus>) {
        let persistence = Arc::new(MemoryPersistence::new());
        let bus = Arc::new(EventBus::default());
        let store = RecordStore::new(persistence.clone(), bus.clone());
        (store, persistence, bus)
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            role: None,
        }
    }

    #[test]
    fn empty_collection_starts_at_id_one() {
        let (store, _, _) = user_store();
        assert!(store.get_all().unwrap().is_empty());
        let user = store.add(new_user("Ana", "ana@example.com")).unwrap();
        assert_eq!(user.id, 1);
    }

    #[test]
    fn add_then_get_by_id_returns_same_record() {
        let (store, _, _) = user_store();
        store.add(new_user("Ana", "ana@example.com")).unwrap();
        let added = store.add(new_user("Ben", "ben@example.com")).unwrap();
        assert_eq!(store.get_by_id(added.id).unwrap(), Some(added));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let (store, _, _) = user_store();
        store.add(new_user("Ana", "ana@example.com")).unwrap();
        let second = store.add(new_user("Ben", "ben@example.com")).unwrap();
        assert!(store.delete(second.id).unwrap());

        let third = store.add(new_user("Cy", "cy@example.com")).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn counter_catches_up_with_existing_ids() {
        let (store, persistence, _) = user_store();
        persistence
            .save(
                "trojan-envoy-users",
                r#"[{"id":41,"name":"Old","email":"old@example.com","role":"admin","lastUpdated":"2025-01-01T00:00:00Z"}]"#,
            )
            .unwrap();

        let user = store.add(new_user("New", "new@example.com")).unwrap();
        assert_eq!(user.id, 42);
    }

    #[test]
    fn delete_missing_id_is_a_no_op() {
        let (store, persistence, bus) = user_store();
        store.add(new_user("Ana", "ana@example.com")).unwrap();
        let before = persistence.load("trojan-envoy-users").unwrap();
        let mut rx = bus.subscribe();

        assert!(!store.delete(999).unwrap());
        assert_eq!(persistence.load("trojan-envoy-users").unwrap(), before);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn update_missing_id_returns_none() {
        let (store, _, _) = user_store();
        let result = store
            .update(
                5,
                UserPatch {
                    name: Some("X".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn update_merges_and_publishes() {
        let (store, _, bus) = user_store();
        let user = store.add(new_user("Ana", "ana@example.com")).unwrap();
        let mut rx = bus.subscribe();

        let updated = store
            .update(
                user.id,
                UserPatch {
                    role: Some(UserRole::Admin),
                    ..Default::default()
                },
            )
            .unwrap()
            .expect("user exists");

        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.role, UserRole::Admin);
        assert!(updated.last_updated >= user.last_updated);
        assert_matches!(rx.try_recv().unwrap(), SiteEvent::User(Change::Updated(u)) if u.id == user.id);
    }

    #[test]
    fn add_publishes_added_event() {
        let (store, _, bus) = user_store();
        let mut rx = bus.subscribe();
        let user = store.add(new_user("Ana", "ana@example.com")).unwrap();
        let event = rx.try_recv().unwrap();
        assert_eq!(event.name(), "user-added");
        assert_eq!(event, SiteEvent::User(Change::Added(user)));
    }

    #[test]
    fn invalid_payload_is_rejected_without_writing() {
        let (store, persistence, _) = user_store();
        let err = store.add(new_user("Ana", "nope")).unwrap_err();
        assert_matches!(err, StoreError::Invalid(CoreError::Validation(_)));
        assert_eq!(persistence.load("trojan-envoy-users").unwrap(), None);
    }

    #[test]
    fn corrupt_collection_surfaces_serialization_error() {
        let (store, persistence, _) = user_store();
        persistence.save("trojan-envoy-users", "{not json").unwrap();
        assert_matches!(store.get_all(), Err(StoreError::Serialization { .. }));
    }

    #[test]
    fn lookup_by_email_is_case_insensitive() {
        let (store, _, _) = user_store();
        store.add(new_user("Ana", "ana@example.com")).unwrap();
        assert!(store.get_by_email("ANA@example.com").unwrap().is_some());
        assert!(store.get_by_email("ben@example.com").unwrap().is_none());
    }

    #[test]
    fn replace_all_raises_counter() {
        let (store, _, _) = user_store();
        let template = store.add(new_user("Ana", "ana@example.com")).unwrap();
        let mut imported = template.clone();
        imported.id = 10;
        store.replace_all(vec![template, imported]).unwrap();

        let next = store.add(new_user("Ben", "ben@example.com")).unwrap();
        assert_eq!(next.id, 11);
    }

    #[test]
    fn navigation_is_seeded_until_first_write() {
        let persistence = Arc::new(MemoryPersistence::new());
        let store: RecordStore<NavigationItem> =
            RecordStore::new(persistence.clone(), Arc::new(EventBus::default()));

        let seeded = store.ordered().unwrap();
        assert!(!seeded.is_empty());
        assert_eq!(seeded[0].path, "/");
        assert_eq!(persistence.load("trojan-envoy-navigation").unwrap(), None);
    }
}
