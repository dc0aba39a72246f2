//! Collaborators the JSON writer needs: user names and calendar links.

use std::collections::HashMap;

use calbridge_core::json::{UrlGenerator, UserDirectory};

/// User directory backed by a fixed map. Unknown users are shown by id.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    names: HashMap<String, String>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.names.insert(user_id.into(), display_name.into());
        self
    }
}

impl UserDirectory for StaticUserDirectory {
    fn display_name(&self, user_id: &str) -> String {
        self.names
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| user_id.to_string())
    }
}

/// Links to `GET /calendars/{calendarId}` under a configured base URL.
#[derive(Debug, Clone)]
pub struct RouteUrlGenerator {
    base_url: String,
}

impl RouteUrlGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }
}

impl UrlGenerator for RouteUrlGenerator {
    fn calendar_url(&self, public_uri: &str) -> String {
        format!("{}/calendars/{public_uri}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_id() {
        let users = StaticUserDirectory::new().with_user("alice", "Alice Liddell");

        assert_eq!(users.display_name("alice"), "Alice Liddell");
        assert_eq!(users.display_name("bob"), "bob");
    }

    #[test]
    fn test_calendar_url_trims_trailing_slash() {
        let urls = RouteUrlGenerator::new("https://cloud.example.com/apps/calendar/");
        assert_eq!(
            urls.calendar_url("local-work"),
            "https://cloud.example.com/apps/calendar/calendars/local-work"
        );
    }
}
