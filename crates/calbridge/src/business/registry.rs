use std::collections::BTreeMap;
use std::sync::Arc;

use calbridge_core::backend::CalendarBackend;
use calbridge_core::calendar::KnownBackends;

use super::error::{BusinessLayerError, Result};

/// Calendar backends keyed by their lowercase id.
#[derive(Clone, Default)]
pub struct BackendRegistry {
    backends: BTreeMap<String, Arc<dyn CalendarBackend>>,
    known: KnownBackends,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `backend` under `id`, replacing any previous registration.
    pub fn register(mut self, id: impl Into<String>, backend: Arc<dyn CalendarBackend>) -> Self {
        self.backends.insert(id.into().to_lowercase(), backend);
        self.known = KnownBackends::new(self.backends.keys().cloned());
        self
    }

    pub fn get(&self, id: &str) -> Result<&Arc<dyn CalendarBackend>> {
        self.backends
            .get(&id.to_lowercase())
            .ok_or_else(|| BusinessLayerError::UnknownBackend(id.to_string()))
    }

    /// Ids usable as public URI prefixes.
    pub fn known_backends(&self) -> &KnownBackends {
        &self.known
    }

    /// Backends in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn CalendarBackend>)> {
        self.backends.iter().map(|(id, backend)| (id.as_str(), backend))
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.backends.keys().collect::<Vec<_>>())
            .finish()
    }
}
