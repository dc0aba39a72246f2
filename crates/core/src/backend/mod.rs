//! The contract every calendar backend satisfies.

mod actions;
mod error;
mod http_mapping;
mod traits;
mod types;

pub use actions::{BackendActions, Capability};
pub use error::{BackendError, Result};
pub use http_mapping::backend_error_to_status_code;
pub use traits::CalendarBackend;
pub use types::Page;
