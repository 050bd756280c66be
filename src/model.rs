//! Primary record model
//!
//! A [`Character`] is one entry of the SWAPI `people` collection. Its scalar
//! attributes are display-only strings; its link fields hold URLs of other
//! resources that are resolved through the [`ResourceCache`](crate::resource::ResourceCache).

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::resource::ResourceKind;

/// Editable scalar attributes, in display order, as `(label, field)` pairs
pub const SCALAR_ATTRIBUTES: &[(&str, &str)] = &[
    ("Height", "height"),
    ("Mass", "mass"),
    ("Hair Color", "hair_color"),
    ("Skin Color", "skin_color"),
    ("Eye Color", "eye_color"),
    ("Birth Year", "birth_year"),
    ("Gender", "gender"),
];

/// A character as returned by the people endpoints
///
/// `url` is the record's identity and must be present; everything else
/// defaults when missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub mass: String,
    #[serde(default)]
    pub hair_color: String,
    #[serde(default)]
    pub skin_color: String,
    #[serde(default)]
    pub eye_color: String,
    #[serde(default)]
    pub birth_year: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub homeworld: String,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

/// A URL reference held by a link field, tagged with the kind it points to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link<'a> {
    pub kind: ResourceKind,
    pub url: &'a str,
}

impl Character {
    /// Every link URL of this character in resolution order: homeworld, then
    /// films, species, vehicles and starships.
    pub fn link_urls(&self) -> Vec<Link<'_>> {
        let mut links = Vec::with_capacity(
            1 + self.films.len() + self.species.len() + self.vehicles.len() + self.starships.len(),
        );

        if !self.homeworld.is_empty() {
            links.push(Link {
                kind: ResourceKind::Planet,
                url: &self.homeworld,
            });
        }

        let groups = [
            (ResourceKind::Film, &self.films),
            (ResourceKind::Species, &self.species),
            (ResourceKind::Vehicle, &self.vehicles),
            (ResourceKind::Starship, &self.starships),
        ];
        for (kind, urls) in groups {
            links.extend(urls.iter().map(|url| Link {
                kind,
                url: url.as_str(),
            }));
        }

        links
    }

    /// The link URLs of one kind
    pub fn links_of(&self, kind: ResourceKind) -> Vec<&str> {
        match kind {
            ResourceKind::Planet if self.homeworld.is_empty() => Vec::new(),
            ResourceKind::Planet => vec![self.homeworld.as_str()],
            ResourceKind::Film => self.films.iter().map(String::as_str).collect(),
            ResourceKind::Species => self.species.iter().map(String::as_str).collect(),
            ResourceKind::Vehicle => self.vehicles.iter().map(String::as_str).collect(),
            ResourceKind::Starship => self.starships.iter().map(String::as_str).collect(),
        }
    }

    /// Read a scalar attribute by field name
    pub fn attribute(&self, field: &str) -> Option<&str> {
        let value = match field {
            "name" => &self.name,
            "height" => &self.height,
            "mass" => &self.mass,
            "hair_color" => &self.hair_color,
            "skin_color" => &self.skin_color,
            "eye_color" => &self.eye_color,
            "birth_year" => &self.birth_year,
            "gender" => &self.gender,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Overwrite a scalar attribute by field name
    ///
    /// Link fields and identity fields cannot be edited.
    pub fn set_attribute(&mut self, field: &str, value: &str) -> Result<()> {
        let slot = match field {
            "name" => &mut self.name,
            "height" => &mut self.height,
            "mass" => &mut self.mass,
            "hair_color" => &mut self.hair_color,
            "skin_color" => &mut self.skin_color,
            "eye_color" => &mut self.eye_color,
            "birth_year" => &mut self.birth_year,
            "gender" => &mut self.gender,
            "homeworld" | "films" | "species" | "vehicles" | "starships" => {
                return Err(anyhow::anyhow!(
                    "'{}' is a link field; rename the linked resource instead",
                    field
                ));
            }
            _ => return Err(anyhow::anyhow!("Unknown or read-only field: {}", field)),
        };
        *slot = value.to_string();
        Ok(())
    }
}
