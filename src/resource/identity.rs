//! Record identity helpers
//!
//! Records are addressed by full URL and by a short id. The short id is always
//! derived from the URL here and never stored separately.

/// Extract the short id of a resource: the last non-empty path segment
/// e.g., "https://swapi.dev/api/people/5/" -> "5"
pub fn record_id(url: &str) -> Option<&str> {
    let path = match url.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or(""),
        None => url,
    };
    let path = path.split(['?', '#']).next().unwrap_or(path);

    path.split('/').filter(|s| !s.is_empty()).next_back()
}

/// Whether two URLs identify the same resource
pub fn same_resource(a: &str, b: &str) -> bool {
    a == b
}

/// Whether `url` is the resource with short id `id`
pub fn has_id(url: &str, id: &str) -> bool {
    record_id(url) == Some(id)
}
