//! Application state shared by all request handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use calbridge_core::json::{UrlGenerator, UserDirectory, WriterContext};

use crate::{
    business::{BackendRegistry, CalendarBusinessLayer},
    config::Config,
    directory::{RouteUrlGenerator, StaticUserDirectory},
    mock_data,
    storage::inmemory::InMemoryBackend,
};

/// Shared application state.
///
/// This is cloned for each request handler; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Calendar operations across all registered backends.
    pub calendars: Arc<CalendarBusinessLayer>,
    /// Display names for user and owner objects.
    pub users: Arc<dyn UserDirectory>,
    /// Absolute links to calendars.
    pub urls: Arc<dyn UrlGenerator>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates an AppState with the given backends.
    pub fn new(
        config: Config,
        registry: BackendRegistry,
        users: impl UserDirectory + 'static,
    ) -> Self {
        Self {
            calendars: Arc::new(CalendarBusinessLayer::new(
                registry,
                config.default_backend.clone(),
            )),
            users: Arc::new(users),
            urls: Arc::new(RouteUrlGenerator::new(config.base_url.clone())),
            config: Arc::new(config),
        }
    }

    /// Creates an AppState with a single empty in-memory backend registered
    /// under the configured default backend id.
    pub fn in_memory(config: Config) -> Self {
        let backend = InMemoryBackend::new(config.default_backend.clone());
        let registry =
            BackendRegistry::new().register(config.default_backend.clone(), Arc::new(backend));

        Self::new(config, registry, StaticUserDirectory::new())
    }

    /// Creates an AppState with demo users and calendars.
    pub async fn with_demo_data(config: Config) -> anyhow::Result<Self> {
        let local = InMemoryBackend::new(config.default_backend.clone());
        let contacts = InMemoryBackend::new(mock_data::CONTACTS_BACKEND).read_only();
        mock_data::seed(&local, &contacts, &config.default_user).await?;

        let registry = BackendRegistry::new()
            .register(local.backend_id().to_string(), Arc::new(local))
            .register(contacts.backend_id().to_string(), Arc::new(contacts));
        let users = mock_data::demo_users(&config.default_user);

        Ok(Self::new(config, registry, users))
    }

    /// Writer context for a request made by `current_user`.
    pub fn writer_context<'a>(&'a self, current_user: &'a str) -> WriterContext<'a> {
        WriterContext {
            current_user,
            urls: self.urls.as_ref(),
            users: self.users.as_ref(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory(Config::default())
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
