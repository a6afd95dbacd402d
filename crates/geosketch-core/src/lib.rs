//! GeoSketch Core - Annotation models, state machine and configuration
//!
//! This crate owns the in-memory annotation state: the draft outline being
//! drawn, the store of saved polygons and markers, and the edit session that
//! guards which single entity is under interactive modification.

pub mod config;
pub mod draft;
pub mod error;
pub mod models;
pub mod ports;
pub mod session;
pub mod store;

pub use error::{GeosketchError, Result};
