//! In-memory backend implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use calbridge_core::backend::{
    BackendActions, BackendError, CalendarBackend, Capability, Page, Result,
};
use calbridge_core::calendar::{compose_public_uri, CalendarRecord, ObjectRecord};

/// Calendars keyed by `(user_id, calendar_uri)`.
type CalendarMap = BTreeMap<(String, String), CalendarRecord>;
/// Objects keyed by `(user_id, calendar_uri, object_uri)`.
type ObjectMap = BTreeMap<(String, String, String), ObjectRecord>;

/// Calendar uris are matched case-insensitively, like public URIs.
fn calendar_key(user_id: &str, calendar_uri: &str) -> (String, String) {
    (user_id.to_string(), calendar_uri.to_lowercase())
}

fn object_key(user_id: &str, calendar_uri: &str, object_uri: &str) -> (String, String, String) {
    (
        user_id.to_string(),
        calendar_uri.to_lowercase(),
        object_uri.to_string(),
    )
}

/// In-memory calendar backend.
///
/// Uses BTreeMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the backend is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    backend_id: String,
    actions: BackendActions,
    calendars: Arc<RwLock<CalendarMap>>,
    objects: Arc<RwLock<ObjectMap>>,
}

impl InMemoryBackend {
    /// Creates an empty backend that supports calendar and object writes.
    pub fn new(backend_id: impl Into<String>) -> Self {
        Self {
            backend_id: backend_id.into().to_lowercase(),
            actions: BackendActions::CREATE_CALENDAR
                | BackendActions::UPDATE_CALENDAR
                | BackendActions::DELETE_CALENDAR
                | BackendActions::CREATE_OBJECT
                | BackendActions::UPDATE_OBJECT
                | BackendActions::DELETE_OBJECT,
            calendars: Arc::new(RwLock::new(BTreeMap::new())),
            objects: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Drops every write capability.
    pub fn read_only(mut self) -> Self {
        self.actions = BackendActions::empty();
        self
    }

    pub fn backend_id(&self) -> &str {
        &self.backend_id
    }

    /// Stores a calendar for `user_id` without capability checks.
    pub async fn insert_calendar(&self, user_id: &str, calendar: CalendarRecord) -> Result<()> {
        let uri = calendar
            .uri
            .clone()
            .ok_or_else(|| BackendError::InvalidData("calendar uri is missing".to_string()))?
            .to_lowercase();
        let calendar = CalendarRecord {
            backend: Some(self.backend_id.clone()),
            uri: Some(uri.clone()),
            ..calendar
        };

        self.calendars
            .write()
            .await
            .insert(calendar_key(user_id, &uri), calendar);
        Ok(())
    }

    /// Stores an object for `user_id`. The calendar must exist.
    pub async fn insert_object(&self, user_id: &str, object: ObjectRecord) -> Result<()> {
        self.find_calendar(&object.calendar_uri, user_id).await?;

        self.objects.write().await.insert(
            object_key(user_id, &object.calendar_uri, &object.uri),
            object,
        );
        Ok(())
    }

    fn public_uri(&self, calendar_uri: &str) -> String {
        compose_public_uri(&self.backend_id, calendar_uri)
    }
}

#[async_trait]
impl CalendarBackend for InMemoryBackend {
    fn supports_actions(&self, actions: BackendActions) -> Capability {
        Capability::negotiate(self.actions, actions)
    }

    async fn should_cache_calendars(&self, _user_id: &str) -> bool {
        false
    }

    async fn should_cache_objects(&self, calendar_uri: &str, user_id: &str) -> Result<bool> {
        self.find_calendar(calendar_uri, user_id).await?;
        Ok(false)
    }

    async fn find_calendar(&self, calendar_uri: &str, user_id: &str) -> Result<CalendarRecord> {
        let calendars = self.calendars.read().await;
        calendars
            .get(&calendar_key(user_id, calendar_uri))
            .cloned()
            .ok_or_else(|| BackendError::calendar_not_found(self.public_uri(calendar_uri)))
    }

    async fn find_calendars(&self, user_id: &str, page: Page) -> Result<Vec<CalendarRecord>> {
        let calendars = self.calendars.read().await;
        let mut owned: Vec<CalendarRecord> = calendars
            .iter()
            .filter(|((owner, _), _)| owner == user_id)
            .map(|(_, calendar)| calendar.clone())
            .collect();

        owned.sort_by(|a, b| {
            a.order
                .unwrap_or_default()
                .cmp(&b.order.unwrap_or_default())
                .then_with(|| a.uri.cmp(&b.uri))
        });

        Ok(page.apply(owned))
    }

    async fn find_object(
        &self,
        calendar_uri: &str,
        object_uri: &str,
        user_id: &str,
    ) -> Result<ObjectRecord> {
        self.find_calendar(calendar_uri, user_id).await?;

        let objects = self.objects.read().await;
        objects
            .get(&object_key(user_id, calendar_uri, object_uri))
            .cloned()
            .ok_or_else(|| BackendError::object_not_found(object_uri))
    }

    async fn find_objects(
        &self,
        calendar_uri: &str,
        user_id: &str,
        page: Page,
    ) -> Result<Vec<ObjectRecord>> {
        self.find_calendar(calendar_uri, user_id).await?;

        let (_, calendar_uri) = calendar_key(user_id, calendar_uri);
        let objects = self.objects.read().await;
        Ok(page.apply(
            objects
                .iter()
                .filter(|((owner, calendar, _), _)| owner == user_id && *calendar == calendar_uri)
                .map(|(_, object)| object.clone()),
        ))
    }

    fn can_be_enabled(&self) -> bool {
        true
    }

    async fn create_calendar(
        &self,
        calendar: &CalendarRecord,
        user_id: &str,
    ) -> Result<CalendarRecord> {
        let uri = calendar
            .uri
            .clone()
            .ok_or_else(|| BackendError::InvalidData("calendar uri is missing".to_string()))?
            .to_lowercase();

        let mut calendars = self.calendars.write().await;
        let key = calendar_key(user_id, &uri);
        if calendars.contains_key(&key) {
            return Err(BackendError::AlreadyExists {
                entity_type: "Calendar",
                id: self.public_uri(&uri),
            });
        }

        let stored = CalendarRecord {
            backend: Some(self.backend_id.clone()),
            uri: Some(uri),
            ..calendar.clone()
        };
        calendars.insert(key, stored.clone());
        Ok(stored)
    }

    async fn update_calendar(
        &self,
        patch: &CalendarRecord,
        calendar_uri: &str,
        user_id: &str,
    ) -> Result<CalendarRecord> {
        let mut calendars = self.calendars.write().await;
        let key = calendar_key(user_id, calendar_uri);
        let Some(stored) = calendars.get_mut(&key) else {
            return Err(BackendError::calendar_not_found(self.public_uri(calendar_uri)));
        };

        let ctag = stored.ctag.unwrap_or_default().saturating_add(1);
        *stored = CalendarRecord {
            backend: Some(self.backend_id.clone()),
            uri: Some(key.1.clone()),
            ctag: Some(ctag),
            ..stored.overlay(patch)
        };
        Ok(stored.clone())
    }

    async fn delete_calendar(&self, calendar_uri: &str, user_id: &str) -> Result<()> {
        let mut calendars = self.calendars.write().await;
        let key = calendar_key(user_id, calendar_uri);
        if calendars.remove(&key).is_none() {
            return Err(BackendError::calendar_not_found(self.public_uri(calendar_uri)));
        }

        // Remove all objects belonging to this calendar
        self.objects
            .write()
            .await
            .retain(|(owner, calendar, _), _| !(owner == user_id && *calendar == key.1));
        Ok(())
    }
}
