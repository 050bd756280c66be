//! Linked resource layer
//!
//! Characters reference planets, films, species, vehicles and starships by
//! URL. This module resolves those URLs once and keeps the results.
//!
//! # Architecture
//!
//! - [`cache`] - URL-keyed cache with one shared in-flight fetch per URL
//! - [`kinds`] - Typed payloads for each linked resource kind
//! - [`identity`] - Short-id extraction and URL identity
//!
//! # Example
//!
//! ```ignore
//! use swapi_browser::resource::{ResourceCache, ResourceKind};
//!
//! async fn homeworld_name(cache: &ResourceCache, url: &str) -> Option<String> {
//!     let planet = cache.resolve(url, ResourceKind::Planet).await?;
//!     Some(planet.display_name().to_string())
//! }
//! ```

mod cache;
mod identity;
mod kinds;

pub use cache::ResourceCache;
pub use identity::{has_id, record_id, same_resource};
pub use kinds::{Film, LinkedResource, Planet, ResourceKind, Species, Starship, Vehicle};
