//! Canonical JSON representation of a calendar.
//!
//! Example output:
//!
//! ```json
//! {
//!   "calendarURI": "local-work",
//!   "url": "https://cloud.example.com/calendars/local-work",
//!   "user": { "userid": "developer42", "displayname": "Developer" },
//!   "owner": { "userid": "developer42", "displayname": "Developer" },
//!   "displayname": "Work",
//!   "ctag": 0,
//!   "color": "#000000",
//!   "order": 0,
//!   "components": { "vevent": true, "vjournal": false, "vtodo": true },
//!   "timezone": null,
//!   "enabled": true,
//!   "cruds": { "code": 31, "create": true, "read": true, "update": true, "delete": true, "share": true }
//! }
//! ```

use serde::Serialize;

use crate::calendar::{CalendarRecord, ComponentSet, Permissions, Timezone};

/// Builds absolute links to the read endpoint of a calendar.
pub trait UrlGenerator: Send + Sync {
    fn calendar_url(&self, public_uri: &str) -> String;
}

/// Resolves user ids to display names.
pub trait UserDirectory: Send + Sync {
    fn display_name(&self, user_id: &str) -> String;
}

/// Request-scoped collaborators needed to serialize a calendar.
#[derive(Clone, Copy)]
pub struct WriterContext<'a> {
    /// User of the current request; stands in for unset user and owner ids.
    pub current_user: &'a str,
    pub urls: &'a dyn UrlGenerator,
    pub users: &'a dyn UserDirectory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonUser {
    pub userid: String,
    pub displayname: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JsonComponents {
    pub vevent: bool,
    pub vjournal: bool,
    pub vtodo: bool,
}

impl From<ComponentSet> for JsonComponents {
    fn from(components: ComponentSet) -> Self {
        Self {
            vevent: components.contains(ComponentSet::EVENT),
            vjournal: components.contains(ComponentSet::JOURNAL),
            vtodo: components.contains(ComponentSet::TODO),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JsonCruds {
    pub code: u8,
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    pub share: bool,
}

impl From<Permissions> for JsonCruds {
    fn from(cruds: Permissions) -> Self {
        Self {
            code: cruds.code(),
            create: cruds.contains(Permissions::CREATE),
            read: cruds.contains(Permissions::READ),
            update: cruds.contains(Permissions::UPDATE),
            delete: cruds.contains(Permissions::DELETE),
            share: cruds.contains(Permissions::SHARE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonTimezone {
    pub std_offset: i32,
    pub dst_offset: i32,
    pub name: String,
}

impl From<&Timezone> for JsonTimezone {
    fn from(timezone: &Timezone) -> Self {
        Self {
            std_offset: timezone.std_offset,
            dst_offset: timezone.dst_offset,
            name: timezone.name.clone(),
        }
    }
}

/// A serialized calendar. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonCalendar {
    #[serde(rename = "calendarURI")]
    pub calendar_uri: String,
    pub url: String,
    pub user: JsonUser,
    pub owner: JsonUser,
    pub displayname: Option<String>,
    pub ctag: u64,
    pub color: Option<String>,
    pub order: i64,
    pub components: JsonComponents,
    pub timezone: Option<JsonTimezone>,
    pub enabled: bool,
    pub cruds: JsonCruds,
}

fn user_info(user_id: Option<&str>, ctx: &WriterContext<'_>) -> JsonUser {
    let userid = user_id.unwrap_or(ctx.current_user);
    JsonUser {
        userid: userid.to_string(),
        displayname: ctx.users.display_name(userid),
    }
}

/// Serializes a calendar record.
pub fn write_calendar(record: &CalendarRecord, ctx: &WriterContext<'_>) -> JsonCalendar {
    let calendar_uri = record.public_uri().unwrap_or_default();

    JsonCalendar {
        url: ctx.urls.calendar_url(&calendar_uri),
        user: user_info(record.user_id.as_deref(), ctx),
        owner: user_info(record.owner_id.as_deref(), ctx),
        displayname: record.display_name.clone(),
        ctag: record.ctag.unwrap_or_default(),
        color: record.color.clone(),
        order: record.order.unwrap_or_default(),
        components: record.components.unwrap_or_default().into(),
        timezone: record.timezone.as_ref().map(JsonTimezone::from),
        enabled: record.enabled.unwrap_or_default(),
        cruds: record.cruds.unwrap_or_default().into(),
        calendar_uri,
    }
}

/// Serializes a collection of calendar records, preserving order.
pub fn write_calendars(records: &[CalendarRecord], ctx: &WriterContext<'_>) -> Vec<JsonCalendar> {
    records
        .iter()
        .map(|record| write_calendar(record, ctx))
        .collect()
}
