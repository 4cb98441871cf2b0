//! Shared types for the Fleetwatch dashboard core
//!
//! This crate contains the entity model consumed across Fleetwatch:
//! - Server fleet records with health metrics
//! - Notification records with read/unread state
//! - Filter parameters and derived-view types

pub mod models;

pub use models::*;
