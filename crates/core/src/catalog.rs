//! Entities shared by car and track mods: nations, authors and the common
//! mod metadata block.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of a nation short code (e.g. `"DE"`, `"GBR"`).
pub const MAX_NATION_CODE_LENGTH: usize = 6;

/// Maximum length of brand, nation, author, category, layout and user names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of car model names, track names and track locations.
pub const MAX_TITLE_LENGTH: usize = 150;

/// Maximum length of download links, author links and image URLs.
pub const MAX_LINK_LENGTH: usize = 500;

/// A country, referenced by name from brands and tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nation {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl Nation {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
        }
    }
}

/// Creator of one or more mods. The name is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub link: String,
}

/// Metadata every downloadable mod carries.
///
/// Flattened into the JSON of [`Car`](crate::car::Car) and
/// [`Track`](crate::track::Track).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModInfo {
    pub download_link: String,
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub image: String,
    pub author: Author,
}

/// Reject blank or over-long identifying names.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    validate_required(field, value, MAX_NAME_LENGTH)
}

/// Reject blank values and values longer than `max` characters.
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    validate_length(field, value, max)
}

/// Reject values longer than `max` characters. Empty values pass.
pub fn validate_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate a nation: non-empty name and a short code within limits.
pub fn validate_nation(nation: &Nation) -> Result<(), CoreError> {
    validate_name("nation name", &nation.name)?;
    if let Some(code) = &nation.code {
        if code.chars().count() > MAX_NATION_CODE_LENGTH {
            return Err(CoreError::Validation(format!(
                "nation code must be at most {MAX_NATION_CODE_LENGTH} characters, got '{code}'"
            )));
        }
    }
    Ok(())
}

/// Validate the shared mod block.
pub fn validate_mod_info(info: &ModInfo) -> Result<(), CoreError> {
    validate_name("author name", &info.author.name)?;
    validate_length("author link", &info.author.link, MAX_LINK_LENGTH)?;
    validate_required("download link", &info.download_link, MAX_LINK_LENGTH)?;
    validate_length("image", &info.image, MAX_LINK_LENGTH)
}
