//! Typed linked resources
//!
//! Each link field on a [`Character`](crate::model::Character) points at one
//! known resource kind, so payloads are decoded into a tagged variant up front
//! instead of being inspected for `title`/`name` at render time.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The kinds of resource a character links to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Planet,
    Film,
    Species,
    Vehicle,
    Starship,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planet => "planet",
            Self::Film => "film",
            Self::Species => "species",
            Self::Vehicle => "vehicle",
            Self::Starship => "starship",
        }
    }

    /// Label used for the link field holding this kind
    pub fn field_label(&self) -> &'static str {
        match self {
            Self::Planet => "Homeworld",
            Self::Film => "Films",
            Self::Species => "Species",
            Self::Vehicle => "Vehicles",
            Self::Starship => "Starships",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Planet {
    pub name: String,
    pub climate: String,
    pub terrain: String,
    pub population: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Film {
    pub title: String,
    pub episode_id: u32,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Species {
    pub name: String,
    pub classification: String,
    pub language: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Starship {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub starship_class: String,
    pub url: String,
}

/// A resolved linked resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LinkedResource {
    Planet(Planet),
    Film(Film),
    Species(Species),
    Vehicle(Vehicle),
    Starship(Starship),
}

impl LinkedResource {
    /// Decode an API payload as the given kind
    pub fn from_value(kind: ResourceKind, value: Value) -> Result<Self> {
        let resource = match kind {
            ResourceKind::Planet => Self::Planet(serde_json::from_value(value)?),
            ResourceKind::Film => Self::Film(serde_json::from_value(value)?),
            ResourceKind::Species => Self::Species(serde_json::from_value(value)?),
            ResourceKind::Vehicle => Self::Vehicle(serde_json::from_value(value)?),
            ResourceKind::Starship => Self::Starship(serde_json::from_value(value)?),
        };
        Ok(resource)
    }

    /// Decode an API payload, attaching the kind to any error
    pub fn decode(kind: ResourceKind, value: Value) -> Result<Self> {
        Self::from_value(kind, value).with_context(|| format!("Malformed {} payload", kind))
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Planet(_) => ResourceKind::Planet,
            Self::Film(_) => ResourceKind::Film,
            Self::Species(_) => ResourceKind::Species,
            Self::Vehicle(_) => ResourceKind::Vehicle,
            Self::Starship(_) => ResourceKind::Starship,
        }
    }

    /// Title for films, name for everything else
    pub fn display_name(&self) -> &str {
        match self {
            Self::Planet(p) => &p.name,
            Self::Film(f) => &f.title,
            Self::Species(s) => &s.name,
            Self::Vehicle(v) => &v.name,
            Self::Starship(s) => &s.name,
        }
    }

    /// Replace the display name (title for films)
    pub fn rename(&mut self, name: &str) {
        let slot = match self {
            Self::Planet(p) => &mut p.name,
            Self::Film(f) => &mut f.title,
            Self::Species(s) => &mut s.name,
            Self::Vehicle(v) => &mut v.name,
            Self::Starship(s) => &mut s.name,
        };
        *slot = name.to_string();
    }

    /// Labelled detail fields; empty values are skipped
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let fields: Vec<(&'static str, String)> = match self {
            Self::Film(f) => vec![
                ("Title", f.title.clone()),
                ("Episode", f.episode_id.to_string()),
                ("Director", f.director.clone()),
                ("Producer", f.producer.clone()),
                ("Release Date", f.release_date.clone()),
            ],
            Self::Planet(p) => vec![
                ("Name", p.name.clone()),
                ("Climate", p.climate.clone()),
                ("Terrain", p.terrain.clone()),
                ("Population", p.population.clone()),
            ],
            Self::Species(s) => vec![
                ("Name", s.name.clone()),
                ("Classification", s.classification.clone()),
                ("Language", s.language.clone()),
            ],
            Self::Vehicle(v) => vec![
                ("Name", v.name.clone()),
                ("Model", v.model.clone()),
                ("Manufacturer", v.manufacturer.clone()),
            ],
            Self::Starship(s) => vec![
                ("Name", s.name.clone()),
                ("Model", s.model.clone()),
                ("Manufacturer", s.manufacturer.clone()),
                ("Class", s.starship_class.clone()),
            ],
        };

        fields.into_iter().filter(|(_, v)| !v.is_empty()).collect()
    }
}
