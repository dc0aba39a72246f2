//! Business layer between the HTTP controller and the calendar backends.

mod calendars;
mod error;
mod registry;

pub use calendars::CalendarBusinessLayer;
pub use error::{BusinessLayerError, Result};
pub use registry::BackendRegistry;
