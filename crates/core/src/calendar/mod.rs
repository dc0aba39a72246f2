mod error;
pub(crate) mod flags;
mod operations;
mod types;
mod uri;

pub use error::CalendarError;
pub use flags::{ComponentSet, Permissions};
pub use operations::is_valid_color;
pub use types::{CalendarRecord, ObjectRecord, Timezone, DEFAULT_COLOR};
pub use uri::{compose_public_uri, KnownBackends};
