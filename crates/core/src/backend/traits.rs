use async_trait::async_trait;

use crate::calendar::{CalendarRecord, ObjectRecord};

use super::{BackendActions, BackendError, Capability, Page, Result};

/// A calendar data source.
///
/// The business layer picks an implementation by backend id and talks to it
/// with backend-local calendar uris. Write operations are optional: callers
/// check [`CalendarBackend::supports_actions`] first, and the default
/// implementations fail with [`BackendError::Unsupported`].
#[async_trait]
pub trait CalendarBackend: Send + Sync {
    /// Reports whether every action in `actions` is implemented.
    fn supports_actions(&self, actions: BackendActions) -> Capability;

    /// Whether calendars of `user_id` may be cached by the caller.
    async fn should_cache_calendars(&self, user_id: &str) -> bool;

    /// Whether objects of a calendar may be cached by the caller.
    async fn should_cache_objects(&self, calendar_uri: &str, user_id: &str) -> Result<bool>;

    /// Gets a calendar by its backend-local uri.
    async fn find_calendar(&self, calendar_uri: &str, user_id: &str) -> Result<CalendarRecord>;

    /// Lists the calendars of a user. Order is backend-defined.
    async fn find_calendars(&self, user_id: &str, page: Page) -> Result<Vec<CalendarRecord>>;

    /// Gets one object of a calendar.
    async fn find_object(
        &self,
        calendar_uri: &str,
        object_uri: &str,
        user_id: &str,
    ) -> Result<ObjectRecord>;

    /// Lists the objects of a calendar.
    async fn find_objects(
        &self,
        calendar_uri: &str,
        user_id: &str,
        page: Page,
    ) -> Result<Vec<ObjectRecord>>;

    /// Whether users may enable this backend.
    fn can_be_enabled(&self) -> bool;

    /// Creates a calendar. Requires [`BackendActions::CREATE_CALENDAR`].
    async fn create_calendar(
        &self,
        _calendar: &CalendarRecord,
        _user_id: &str,
    ) -> Result<CalendarRecord> {
        Err(BackendError::Unsupported("creating calendars"))
    }

    /// Overlays the fields set in `patch` on the stored calendar and bumps
    /// its ctag. Requires [`BackendActions::UPDATE_CALENDAR`].
    ///
    /// Read, overlay and write happen as one step, so concurrent updates of
    /// the same calendar each observe the previous one's ctag.
    async fn update_calendar(
        &self,
        _patch: &CalendarRecord,
        _calendar_uri: &str,
        _user_id: &str,
    ) -> Result<CalendarRecord> {
        Err(BackendError::Unsupported("updating calendars"))
    }

    /// Deletes a calendar. Requires [`BackendActions::DELETE_CALENDAR`].
    async fn delete_calendar(&self, _calendar_uri: &str, _user_id: &str) -> Result<()> {
        Err(BackendError::Unsupported("deleting calendars"))
    }
}
