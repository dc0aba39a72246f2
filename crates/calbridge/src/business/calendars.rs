//! Calendar operations across all registered backends.

use uuid::Uuid;

use calbridge_core::backend::{BackendActions, BackendError, CalendarBackend, Page};
use calbridge_core::calendar::{compose_public_uri, CalendarRecord, KnownBackends};

use super::error::{BusinessLayerError, Result};
use super::registry::BackendRegistry;

/// Dispatches calendar requests to the backend named in the public URI.
#[derive(Debug, Clone)]
pub struct CalendarBusinessLayer {
    registry: BackendRegistry,
    /// Backend for calendars created without a calendarURI.
    default_backend: String,
}

fn require(
    backend: &dyn CalendarBackend,
    action: BackendActions,
    description: &'static str,
) -> Result<()> {
    if backend.supports_actions(action).is_supported() {
        Ok(())
    } else {
        Err(BackendError::Unsupported(description).into())
    }
}

impl CalendarBusinessLayer {
    pub fn new(registry: BackendRegistry, default_backend: impl Into<String>) -> Self {
        Self {
            registry,
            default_backend: default_backend.into().to_lowercase(),
        }
    }

    pub fn known_backends(&self) -> &KnownBackends {
        self.registry.known_backends()
    }

    /// Lists the calendars of `user_id` across every backend.
    ///
    /// Backends are visited in id order; `page` applies to the combined list.
    pub async fn find_all(&self, user_id: &str, page: Page) -> Result<Vec<CalendarRecord>> {
        let mut calendars = Vec::new();
        for (_, backend) in self.registry.iter() {
            calendars.extend(backend.find_calendars(user_id, Page::all()).await?);
        }

        Ok(page.apply(calendars))
    }

    /// Gets one calendar by public URI.
    pub async fn find(&self, public_uri: &str, user_id: &str) -> Result<CalendarRecord> {
        let (backend_id, uri) = self.known_backends().split(public_uri)?;
        let backend = self.registry.get(&backend_id)?;

        Ok(backend.find_calendar(&uri, user_id).await?)
    }

    /// Creates a calendar, filling in defaults for every unset field.
    pub async fn create(&self, calendar: CalendarRecord, user_id: &str) -> Result<CalendarRecord> {
        let backend_id = calendar
            .backend
            .clone()
            .unwrap_or_else(|| self.default_backend.clone());
        let uri = calendar
            .uri
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let public_uri = compose_public_uri(&backend_id, &uri);

        let backend = self.registry.get(&backend_id)?;
        require(
            backend.as_ref(),
            BackendActions::CREATE_CALENDAR,
            "creating calendars",
        )?;

        match backend.find_calendar(&uri, user_id).await {
            Ok(_) => {
                return Err(BackendError::AlreadyExists {
                    entity_type: "Calendar",
                    id: public_uri,
                }
                .into())
            }
            Err(BackendError::NotFound { .. }) => {}
            Err(error) => return Err(error.into()),
        }

        let calendar = CalendarRecord {
            backend: Some(backend_id),
            uri: Some(uri),
            user_id: Some(user_id.to_string()),
            ..calendar
        }
        .fill_defaults();

        let created = backend.create_calendar(&calendar, user_id).await?;
        tracing::debug!(calendar = %public_uri, user = %user_id, "Created calendar");

        Ok(created)
    }

    /// Overlays the fields set in `patch` on the stored calendar and bumps its ctag.
    pub async fn update(
        &self,
        patch: CalendarRecord,
        public_uri: &str,
        user_id: &str,
    ) -> Result<CalendarRecord> {
        let (backend_id, uri) = self.known_backends().split(public_uri)?;
        let target = compose_public_uri(&backend_id, &uri);

        if let Some(requested) = patch.public_uri() {
            if requested != target {
                return Err(BusinessLayerError::UriChange {
                    from: target,
                    to: requested,
                });
            }
        }

        let backend = self.registry.get(&backend_id)?;
        require(
            backend.as_ref(),
            BackendActions::UPDATE_CALENDAR,
            "updating calendars",
        )?;

        let updated = backend.update_calendar(&patch, &uri, user_id).await?;
        tracing::debug!(calendar = %target, user = %user_id, ctag = ?updated.ctag, "Updated calendar");

        Ok(updated)
    }

    /// Deletes a calendar by public URI.
    pub async fn delete(&self, public_uri: &str, user_id: &str) -> Result<()> {
        let (backend_id, uri) = self.known_backends().split(public_uri)?;
        let backend = self.registry.get(&backend_id)?;
        require(
            backend.as_ref(),
            BackendActions::DELETE_CALENDAR,
            "deleting calendars",
        )?;

        backend.delete_calendar(&uri, user_id).await?;
        tracing::debug!(calendar = %public_uri, user = %user_id, "Deleted calendar");

        Ok(())
    }
}
