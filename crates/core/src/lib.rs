//! Functional core of calbridge.
//!
//! Everything in this crate is pure: calendar records and their flag sets,
//! the public URI scheme, the JSON reader and writer, and the contract that
//! calendar backends implement. I/O lives in the `calbridge` crate.

pub mod backend;
pub mod calendar;
pub mod json;
