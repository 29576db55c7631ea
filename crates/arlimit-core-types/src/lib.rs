//! Core types shared across arlimit facilities
//!
//! Canonical field keys and event names used by the logging and error
//! facilities in `arlimit-core`.

pub mod schema;
