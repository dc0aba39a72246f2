//! Demo users and calendars for local development.

use calbridge_core::backend::Result;
use calbridge_core::calendar::{CalendarRecord, ComponentSet, ObjectRecord, Permissions};

use crate::{directory::StaticUserDirectory, storage::inmemory::InMemoryBackend};

/// Id of the read-only demo backend.
pub const CONTACTS_BACKEND: &str = "contacts";

/// Display names for the demo users.
pub fn demo_users(default_user: &str) -> StaticUserDirectory {
    StaticUserDirectory::new()
        .with_user(default_user, "Administrator")
        .with_user("alice", "Alice Liddell")
        .with_user("bob", "Bob Builder")
}

/// Seeds a personal and a work calendar into `local` and a birthday
/// calendar into the read-only `contacts` backend for `user_id`.
pub async fn seed(local: &InMemoryBackend, contacts: &InMemoryBackend, user_id: &str) -> Result<()> {
    let personal = CalendarRecord::new(local.backend_id(), "personal")
        .with_user_id(user_id)
        .with_owner_id(user_id)
        .with_display_name("Personal")
        .with_color("#3B82F6") // Blue
        .with_components(ComponentSet::EVENT | ComponentSet::TODO)
        .fill_defaults();

    let mut work = CalendarRecord::new(local.backend_id(), "work")
        .with_user_id(user_id)
        .with_owner_id("alice")
        .with_display_name("Work")
        .with_color("#10B981") // Green
        .with_cruds(Permissions::READ | Permissions::UPDATE)
        .fill_defaults();
    work.order = Some(1);

    let birthdays = CalendarRecord::new(contacts.backend_id(), "birthdays")
        .with_user_id(user_id)
        .with_owner_id(user_id)
        .with_display_name("Contact birthdays")
        .with_color("#EC4899") // Pink
        .with_components(ComponentSet::EVENT)
        .with_cruds(Permissions::READ)
        .fill_defaults();

    local.insert_calendar(user_id, personal).await?;
    local.insert_calendar(user_id, work).await?;
    contacts.insert_calendar(user_id, birthdays).await?;

    local
        .insert_object(
            user_id,
            ObjectRecord {
                calendar_uri: "work".to_string(),
                uri: "standup.ics".to_string(),
                etag: "1".to_string(),
                component: ComponentSet::EVENT,
                calendar_data: [
                    "BEGIN:VCALENDAR",
                    "VERSION:2.0",
                    "BEGIN:VEVENT",
                    "UID:standup",
                    "SUMMARY:Standup Meeting",
                    "DTSTART:20260105T090000Z",
                    "DTEND:20260105T093000Z",
                    "END:VEVENT",
                    "END:VCALENDAR",
                ]
                .join("\r\n"),
            },
        )
        .await?;

    Ok(())
}
