//! All site collections behind one handle, with the page ↔ navigation
//! cascade.
//!
//! A `Page` whose `showInNavigation` flag is set owns exactly one navigation
//! entry labelled with its title and pointing at `/<slug>`. Content writes
//! go through [`SiteRecords`] so that entry is created, patched and removed
//! together with the page.

use std::sync::{Arc, Mutex, MutexGuard};

use envoy_core::records::{
    ContactRequest, ContentItem, ContentPatch, ContentType, NavigationItem, NavigationPatch,
    NewContent, NewNavigationItem, User, WaitingListEntry,
};
use envoy_core::types::DbId;
use envoy_events::EventBus;

use crate::error::StoreResult;
use crate::persistence::Persistence;
use crate::store::RecordStore;

pub struct SiteRecords {
    content: RecordStore<ContentItem>,
    navigation: RecordStore<NavigationItem>,
    users: RecordStore<User>,
    contacts: RecordStore<ContactRequest>,
    waiting_list: RecordStore<WaitingListEntry>,
    cascade_lock: Mutex<()>,
}

impl SiteRecords {
    pub fn new(persistence: Arc<dyn Persistence>, bus: Arc<EventBus>) -> Self {
        Self {
            content: RecordStore::new(Arc::clone(&persistence), Arc::clone(&bus)),
            navigation: RecordStore::new(Arc::clone(&persistence), Arc::clone(&bus)),
            users: RecordStore::new(Arc::clone(&persistence), Arc::clone(&bus)),
            contacts: RecordStore::new(Arc::clone(&persistence), Arc::clone(&bus)),
            waiting_list: RecordStore::new(persistence, bus),
            cascade_lock: Mutex::new(()),
        }
    }

    pub fn navigation(&self) -> &RecordStore<NavigationItem> {
        &self.navigation
    }

    pub fn users(&self) -> &RecordStore<User> {
        &self.users
    }

    pub fn contacts(&self) -> &RecordStore<ContactRequest> {
        &self.contacts
    }

    pub fn waiting_list(&self) -> &RecordStore<WaitingListEntry> {
        &self.waiting_list
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.cascade_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    // -----------------------------------------------------------------------
    // Content reads
    // -----------------------------------------------------------------------

    pub fn all_content(&self) -> StoreResult<Vec<ContentItem>> {
        self.content.get_all()
    }

    pub fn content_by_id(&self, id: DbId) -> StoreResult<Option<ContentItem>> {
        self.content.get_by_id(id)
    }

    pub fn content_by_slug(&self, slug: &str) -> StoreResult<Option<ContentItem>> {
        self.content.get_by_slug(slug)
    }

    pub fn content_by_type(&self, content_type: &ContentType) -> StoreResult<Vec<ContentItem>> {
        self.content.get_by_type(content_type)
    }

    // -----------------------------------------------------------------------
    // Content writes
    // -----------------------------------------------------------------------

    /// Add a content item, creating its navigation entry when it is a shown
    /// page.
    ///
    /// If the navigation write fails the new item is deleted again and the
    /// navigation error is returned.
    pub fn add_content(&self, new: NewContent) -> StoreResult<ContentItem> {
        let _guard = self.lock();
        let item = self.content.add(new)?;
        if item.wants_navigation() {
            if let Err(e) = self.show_in_navigation(&item, None) {
                tracing::warn!(
                    content_id = item.id,
                    error = %e,
                    "Navigation write failed, rolling back content",
                );
                if let Err(rollback) = self.content.delete(item.id) {
                    tracing::error!(
                        content_id = item.id,
                        error = %rollback,
                        "Content rollback failed",
                    );
                }
                return Err(e);
            }
        }
        Ok(item)
    }

    /// Update a content item and bring its navigation entry in line.
    ///
    /// The content write is not undone when the navigation write after it
    /// fails; a later update of the same item repairs the entry.
    pub fn update_content(&self, id: DbId, patch: ContentPatch) -> StoreResult<Option<ContentItem>> {
        let _guard = self.lock();
        let Some(before) = self.content.get_by_id(id)? else {
            return Ok(None);
        };
        let Some(after) = self.content.update(id, patch)? else {
            return Ok(None);
        };

        let previous_path = before.wants_navigation().then(|| before.path());
        if after.wants_navigation() {
            self.show_in_navigation(&after, previous_path.as_deref())?;
        } else if let Some(path) = previous_path {
            self.hide_from_navigation(&path)?;
        }
        Ok(Some(after))
    }

    /// Delete a content item and the navigation entry of a shown page.
    ///
    /// A navigation failure after the content is gone leaves the entry in
    /// place and is returned as an error.
    pub fn delete_content(&self, id: DbId) -> StoreResult<bool> {
        let _guard = self.lock();
        let Some(existing) = self.content.get_by_id(id)? else {
            return Ok(false);
        };
        if !self.content.delete(id)? {
            return Ok(false);
        }
        if existing.wants_navigation() {
            self.hide_from_navigation(&existing.path())?;
        }
        Ok(true)
    }

    /// Create or refresh the navigation entry for a shown page.
    ///
    /// The entry is looked up at `previous_path` (where it lived before a
    /// title/slug change) and then at the page's current path, so an
    /// existing entry is patched rather than duplicated.
    fn show_in_navigation(&self, page: &ContentItem, previous_path: Option<&str>) -> StoreResult<()> {
        let path = page.path();
        let existing = match previous_path {
            Some(old) => self.navigation.get_by_path(old)?,
            None => None,
        };
        let existing = match existing {
            Some(entry) => Some(entry),
            None => self.navigation.get_by_path(&path)?,
        };

        match existing {
            Some(entry) if entry.label == page.title && entry.path == path => {}
            Some(entry) => {
                tracing::debug!(nav_id = entry.id, %path, "Syncing navigation entry with page");
                self.navigation.update(
                    entry.id,
                    NavigationPatch {
                        label: Some(page.title.clone()),
                        path: Some(path),
                        order: None,
                    },
                )?;
            }
            None => {
                let entry = self.navigation.add(NewNavigationItem {
                    label: page.title.clone(),
                    path,
                    order: None,
                })?;
                tracing::debug!(nav_id = entry.id, content_id = page.id, "Navigation entry created for page");
            }
        }
        Ok(())
    }

    fn hide_from_navigation(&self, path: &str) -> StoreResult<()> {
        if let Some(entry) = self.navigation.get_by_path(path)? {
            self.navigation.delete(entry.id)?;
            tracing::debug!(nav_id = entry.id, %path, "Navigation entry removed for page");
        }
        Ok(())
    }
}
