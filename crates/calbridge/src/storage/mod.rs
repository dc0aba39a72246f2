//! Calendar backend implementations.
//!
//! This module provides concrete implementations of the
//! `calbridge_core::backend::CalendarBackend` trait. The business layer
//! holds them as trait objects keyed by backend id.

pub mod inmemory;
