//! SWAPI interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Endpoint URLs and typed people requests
//! - [`http`] - HTTP utilities for REST calls
//!
//! # Example
//!
//! ```ignore
//! use swapi_browser::swapi::client::SwapiClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = SwapiClient::new("https://swapi.dev/api")?;
//!     let page = client.list_people(1, "sky").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;

pub use client::{PeoplePage, SwapiClient, DEFAULT_BASE_URL};
pub use http::{format_api_error, ApiError};
