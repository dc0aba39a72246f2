//! JSON reader and writer for calendars.

mod coerce;
mod reader;
mod writer;

pub use reader::{read_calendar, read_calendar_str};
pub use writer::{
    write_calendar, write_calendars, JsonCalendar, JsonComponents, JsonCruds, JsonTimezone,
    JsonUser, UrlGenerator, UserDirectory, WriterContext,
};
