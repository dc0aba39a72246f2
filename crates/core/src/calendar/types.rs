use super::flags::{ComponentSet, Permissions};
use super::uri::compose_public_uri;

/// Default color for calendars created without one.
pub const DEFAULT_COLOR: &str = "#1d2d44";

/// Timezone attached to a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timezone {
    /// Standard UTC offset in seconds.
    pub std_offset: i32,
    /// Daylight-saving UTC offset in seconds.
    pub dst_offset: i32,
    /// IANA name, e.g. `Europe/Berlin`.
    pub name: String,
}

/// A calendar as handled by one request.
///
/// Every field is optional: records read from client JSON only carry the
/// fields the client sent, and an update overlays exactly those fields on
/// the stored record (see [`CalendarRecord::overlay`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarRecord {
    /// Id of the backend owning this calendar.
    pub backend: Option<String>,
    /// Backend-local identifier.
    pub uri: Option<String>,
    /// User this record belongs to in the current context.
    pub user_id: Option<String>,
    /// User who owns the calendar. Differs from `user_id` for shared calendars.
    pub owner_id: Option<String>,
    pub display_name: Option<String>,
    pub color: Option<String>,
    /// Change tag, bumped on every modification.
    pub ctag: Option<u64>,
    pub order: Option<i64>,
    pub enabled: Option<bool>,
    pub components: Option<ComponentSet>,
    pub cruds: Option<Permissions>,
    pub timezone: Option<Timezone>,
}

impl CalendarRecord {
    /// Creates a record for `uri` inside `backend`.
    pub fn new(backend: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            backend: Some(backend.into()),
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    /// The public identifier, if both backend and uri are known.
    pub fn public_uri(&self) -> Option<String> {
        match (&self.backend, &self.uri) {
            (Some(backend), Some(uri)) => Some(compose_public_uri(backend, uri)),
            _ => None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_ctag(mut self, ctag: u64) -> Self {
        self.ctag = Some(ctag);
        self
    }

    pub fn with_components(mut self, components: ComponentSet) -> Self {
        self.components = Some(components);
        self
    }

    pub fn with_cruds(mut self, cruds: Permissions) -> Self {
        self.cruds = Some(cruds);
        self
    }

    /// Returns a new record with every field set in `patch` replacing the
    /// corresponding field of `self`.
    pub fn overlay(&self, patch: &CalendarRecord) -> CalendarRecord {
        fn pick<T: Clone>(patch: &Option<T>, base: &Option<T>) -> Option<T> {
            patch.as_ref().or(base.as_ref()).cloned()
        }

        CalendarRecord {
            backend: pick(&patch.backend, &self.backend),
            uri: pick(&patch.uri, &self.uri),
            user_id: pick(&patch.user_id, &self.user_id),
            owner_id: pick(&patch.owner_id, &self.owner_id),
            display_name: pick(&patch.display_name, &self.display_name),
            color: pick(&patch.color, &self.color),
            ctag: pick(&patch.ctag, &self.ctag),
            order: pick(&patch.order, &self.order),
            enabled: pick(&patch.enabled, &self.enabled),
            components: pick(&patch.components, &self.components),
            cruds: pick(&patch.cruds, &self.cruds),
            timezone: pick(&patch.timezone, &self.timezone),
        }
    }

    /// Fills unset fields with the defaults of a freshly created calendar.
    pub fn fill_defaults(mut self) -> Self {
        if self.display_name.is_none() {
            self.display_name = self.uri.clone();
        }
        self.color.get_or_insert_with(|| DEFAULT_COLOR.to_string());
        self.ctag.get_or_insert(1);
        self.order.get_or_insert(0);
        self.enabled.get_or_insert(true);
        self.components.get_or_insert(ComponentSet::ALL);
        self.cruds.get_or_insert(Permissions::ALL);
        if self.owner_id.is_none() {
            self.owner_id = self.user_id.clone();
        }
        self
    }
}

/// An event, journal or todo stored in a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    /// Backend-local uri of the calendar holding this object.
    pub calendar_uri: String,
    pub uri: String,
    pub etag: String,
    /// The kind of object; a single component flag.
    pub component: ComponentSet,
    /// Raw iCalendar text.
    pub calendar_data: String,
}
