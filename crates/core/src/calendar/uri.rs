//! Public calendar identifiers.
//!
//! A public URI joins a backend id and the backend-local calendar uri with a
//! dash and lowercases the result. Both halves may themselves contain dashes,
//! so splitting has to consult the list of backend ids the service knows.

use super::error::CalendarError;

const SEPARATOR: char = '-';

/// Composes the externally visible identifier of a calendar.
///
/// # Examples
///
/// ```
/// use calbridge_core::calendar::compose_public_uri;
///
/// assert_eq!(compose_public_uri("Local", "Work"), "local-work");
/// ```
pub fn compose_public_uri(backend: &str, uri: &str) -> String {
    format!("{backend}{SEPARATOR}{uri}").to_lowercase()
}

/// The backend ids a public URI may start with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownBackends {
    ids: Vec<String>,
}

impl KnownBackends {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids: Vec<String> = ids.into_iter().map(|id| id.into().to_lowercase()).collect();
        ids.sort();
        ids.dedup();
        Self { ids }
    }

    pub fn contains(&self, backend: &str) -> bool {
        self.ids.iter().any(|id| id.eq_ignore_ascii_case(backend))
    }

    /// Splits a public URI into `(backend, uri)`.
    ///
    /// The longest known backend id followed by the separator and a non-empty
    /// remainder wins, so `local-shared-team` resolves to
    /// `("local-shared", "team")` when both `local` and `local-shared` are known.
    pub fn split(&self, public_uri: &str) -> Result<(String, String), CalendarError> {
        let lowered = public_uri.to_lowercase();

        self.ids
            .iter()
            .filter_map(|id| {
                lowered
                    .strip_prefix(id.as_str())
                    .and_then(|rest| rest.strip_prefix(SEPARATOR))
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (id, rest))
            })
            .max_by_key(|(id, _)| id.len())
            .map(|(id, rest)| (id.clone(), rest.to_string()))
            .ok_or_else(|| CalendarError::InvalidIdentifier(public_uri.to_string()))
    }
}
