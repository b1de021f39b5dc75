//! The [`Record`] trait binding a record type to its collection.

use envoy_core::error::CoreError;
use envoy_core::records::{
    default_navigation, ContactPatch, ContactRequest, ContentItem, ContentPatch, NavigationItem,
    NavigationPatch, NewContactRequest, NewContent, NewNavigationItem, NewUser,
    NewWaitingListEntry, User, UserPatch, WaitingListEntry, WaitingListPatch,
};
use envoy_core::types::{DbId, Timestamp};
use envoy_events::{Change, SiteEvent};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type stored as one JSON array under [`Record::STORAGE_KEY`].
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Creation payload.
    type New;
    /// Partial update payload.
    type Patch;

    /// Key the collection is persisted under.
    const STORAGE_KEY: &'static str;
    /// Entity name used in logs and errors.
    const ENTITY: &'static str;

    fn id(&self) -> DbId;

    fn validate_new(new: &Self::New) -> Result<(), CoreError>;

    fn validate_patch(patch: &Self::Patch) -> Result<(), CoreError>;

    /// Build a record with the assigned `id`. `existing` is the collection
    /// before insertion.
    fn create(id: DbId, new: Self::New, existing: &[Self], now: Timestamp) -> Self;

    fn apply(&mut self, patch: Self::Patch, now: Timestamp);

    /// Wrap a change to this record type in its [`SiteEvent`] variant.
    fn event(change: Change<Self>) -> SiteEvent;

    /// Reject `self` when it clashes with another record in `records`.
    /// `records` may contain `self`'s previous version.
    fn check_unique(&self, _records: &[Self]) -> Result<(), CoreError> {
        Ok(())
    }

    /// Contents of the collection before anything has been persisted.
    fn seed(_now: Timestamp) -> Vec<Self> {
        Vec::new()
    }
}

impl Record for ContentItem {
    type New = NewContent;
    type Patch = ContentPatch;

    const STORAGE_KEY: &'static str = "trojan-envoy-content";
    const ENTITY: &'static str = "Content";

    fn id(&self) -> DbId {
        self.id
    }

    fn validate_new(new: &NewContent) -> Result<(), CoreError> {
        new.validate()
    }

    fn validate_patch(patch: &ContentPatch) -> Result<(), CoreError> {
        patch.validate()
    }

    fn create(id: DbId, new: NewContent, _existing: &[Self], now: Timestamp) -> Self {
        ContentItem::from_new(id, new, now)
    }

    fn apply(&mut self, patch: ContentPatch, now: Timestamp) {
        ContentItem::apply(self, patch, now);
    }

    fn check_unique(&self, records: &[Self]) -> Result<(), CoreError> {
        self.check_slug_unique(records)
    }

    fn event(change: Change<Self>) -> SiteEvent {
        SiteEvent::Content(change)
    }
}

impl Record for NavigationItem {
    type New = NewNavigationItem;
    type Patch = NavigationPatch;

    const STORAGE_KEY: &'static str = "trojan-envoy-navigation";
    const ENTITY: &'static str = "Navigation";

    fn id(&self) -> DbId {
        self.id
    }

    fn validate_new(new: &NewNavigationItem) -> Result<(), CoreError> {
        new.validate()
    }

    fn validate_patch(patch: &NavigationPatch) -> Result<(), CoreError> {
        patch.validate()
    }

    fn create(id: DbId, new: NewNavigationItem, existing: &[Self], now: Timestamp) -> Self {
        let next_order = existing.iter().map(|n| n.order).max().unwrap_or(0) + 1;
        NavigationItem::from_new(id, new, next_order, now)
    }

    fn apply(&mut self, patch: NavigationPatch, now: Timestamp) {
        NavigationItem::apply(self, patch, now);
    }

    fn event(change: Change<Self>) -> SiteEvent {
        SiteEvent::Navigation(change)
    }

    fn seed(now: Timestamp) -> Vec<Self> {
        default_navigation(now)
    }
}

impl Record for User {
    type New = NewUser;
    type Patch = UserPatch;

    const STORAGE_KEY: &'static str = "trojan-envoy-users";
    const ENTITY: &'static str = "User";

    fn id(&self) -> DbId {
        self.id
    }

    fn validate_new(new: &NewUser) -> Result<(), CoreError> {
        new.validate()
    }

    fn validate_patch(patch: &UserPatch) -> Result<(), CoreError> {
        patch.validate()
    }

    fn create(id: DbId, new: NewUser, _existing: &[Self], now: Timestamp) -> Self {
        User::from_new(id, new, now)
    }

    fn apply(&mut self, patch: UserPatch, now: Timestamp) {
        User::apply(self, patch, now);
    }

    fn event(change: Change<Self>) -> SiteEvent {
        SiteEvent::User(change)
    }
}

impl Record for ContactRequest {
    type New = NewContactRequest;
    type Patch = ContactPatch;

    const STORAGE_KEY: &'static str = "trojan-envoy-contacts";
    const ENTITY: &'static str = "ContactRequest";

    fn id(&self) -> DbId {
        self.id
    }

    fn validate_new(new: &NewContactRequest) -> Result<(), CoreError> {
        new.validate()
    }

    fn validate_patch(_patch: &ContactPatch) -> Result<(), CoreError> {
        Ok(())
    }

    fn create(id: DbId, new: NewContactRequest, _existing: &[Self], now: Timestamp) -> Self {
        ContactRequest::from_new(id, new, now)
    }

    fn apply(&mut self, patch: ContactPatch, now: Timestamp) {
        ContactRequest::apply(self, patch, now);
    }

    fn event(change: Change<Self>) -> SiteEvent {
        SiteEvent::Contact(change)
    }
}

impl Record for WaitingListEntry {
    type New = NewWaitingListEntry;
    type Patch = WaitingListPatch;

    const STORAGE_KEY: &'static str = "waiting-list";
    const ENTITY: &'static str = "WaitingListEntry";

    fn id(&self) -> DbId {
        self.id
    }

    fn validate_new(new: &NewWaitingListEntry) -> Result<(), CoreError> {
        new.validate()
    }

    fn validate_patch(_patch: &WaitingListPatch) -> Result<(), CoreError> {
        Ok(())
    }

    fn create(id: DbId, new: NewWaitingListEntry, _existing: &[Self], now: Timestamp) -> Self {
        WaitingListEntry::from_new(id, new, now)
    }

    fn apply(&mut self, patch: WaitingListPatch, now: Timestamp) {
        WaitingListEntry::apply(self, patch, now);
    }

    fn event(change: Change<Self>) -> SiteEvent {
        SiteEvent::WaitingList(change)
    }
}
