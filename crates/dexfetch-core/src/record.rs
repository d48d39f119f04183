//! Wire models for the remote API.
//!
//! Only the fields the normalizer reads are modelled; everything else in the
//! payload is ignored by serde.

use crate::retry::FetchError;
use serde::Deserialize;

/// A `{ "name": ..., "url": ... }` reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One entry of the `stats` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// One entry of the `types` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

/// Species reference; only the URL is followed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpeciesRef {
    pub url: String,
}

/// Record served by `GET {base}/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrimaryRecord {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub species: SpeciesRef,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
}

/// Record served by `GET {species.url}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SecondaryRecord {
    pub is_legendary: bool,
    pub is_mythical: bool,
}

/// Build the primary endpoint URL for `id`: `{base}/{id}`.
///
/// A missing trailing slash on `base` is tolerated.
pub fn primary_url(base: &str, id: u32) -> Result<String, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: base.to_string(),
        reason,
    };
    let mut base = url::Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let joined = base
        .join(&id.to_string())
        .map_err(|e| invalid(e.to_string()))?;
    Ok(joined.into())
}
