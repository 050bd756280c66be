//! Star Wars API character browser
//!
//! The core is the [`store::RecordStore`], which loads pages of characters and
//! resolves each character's links through a shared
//! [`resource::ResourceCache`] so that a URL referenced by many characters is
//! fetched once.
//!
//! # Module Structure
//!
//! - [`swapi`] - HTTP client and endpoint helpers
//! - [`resource`] - Linked resource cache, typed payloads and identity helpers
//! - [`model`] - The character record
//! - [`store`] - Page loading, lookup and local edits
//! - [`render`] - Plain-text views used by the binary
//! - [`config`] - Persistent user configuration

pub mod config;
pub mod model;
pub mod render;
pub mod resource;
pub mod store;
pub mod swapi;

pub use model::Character;
pub use resource::{LinkedResource, ResourceCache, ResourceKind};
pub use store::{CharacterRecord, RecordStore};
