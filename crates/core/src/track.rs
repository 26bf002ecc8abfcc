//! Track mod entity with its owned layouts and enumerated tags.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    validate_length, validate_mod_info, validate_name, validate_nation, validate_required,
    ModInfo, Nation, MAX_TITLE_LENGTH,
};
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Layout types
// ---------------------------------------------------------------------------

/// Kind of circuit a layout describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutType {
    #[serde(rename = "Road course")]
    RoadCourse,
    Oval,
    #[serde(rename = "Point to point")]
    PointToPoint,
    #[serde(rename = "Rally stage")]
    RallyStage,
    Drift,
    Karting,
}

impl LayoutType {
    /// Every layout type, in display order.
    pub const ALL: [LayoutType; 6] = [
        Self::RoadCourse,
        Self::Oval,
        Self::PointToPoint,
        Self::RallyStage,
        Self::Drift,
        Self::Karting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoadCourse => "Road course",
            Self::Oval => "Oval",
            Self::PointToPoint => "Point to point",
            Self::RallyStage => "Rally stage",
            Self::Drift => "Drift",
            Self::Karting => "Karting",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid layout type '{s}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Track tags
// ---------------------------------------------------------------------------

/// Descriptive label attached to a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackTag {
    F1,
    Touge,
    Street,
    Historic,
    Oval,
    Rally,
    Drift,
    Endurance,
    Karting,
    Fantasy,
}

impl TrackTag {
    pub const ALL: [TrackTag; 10] = [
        Self::F1,
        Self::Touge,
        Self::Street,
        Self::Historic,
        Self::Oval,
        Self::Rally,
        Self::Drift,
        Self::Endurance,
        Self::Karting,
        Self::Fantasy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::F1 => "F1",
            Self::Touge => "Touge",
            Self::Street => "Street",
            Self::Historic => "Historic",
            Self::Oval => "Oval",
            Self::Rally => "Rally",
            Self::Drift => "Drift",
            Self::Endurance => "Endurance",
            Self::Karting => "Karting",
            Self::Fantasy => "Fantasy",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid track tag '{s}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// One drivable configuration of a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    /// Length in metres.
    pub length_m: i32,
    pub category: LayoutType,
}

/// A track mod.
///
/// `id` is absent on insert and required on update. `version` is compared
/// against the stored value on update to report whether it changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(flatten)]
    pub info: ModInfo,
    /// Unique across the catalog.
    pub name: String,
    pub nation: Nation,
    #[serde(default)]
    pub location: String,
    pub year: i32,
    #[serde(default)]
    pub layouts: Vec<Layout>,
    #[serde(default)]
    pub tags: Vec<TrackTag>,
    #[serde(default)]
    pub version: i32,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Validate a track before it is written.
pub fn validate_track(track: &Track) -> Result<(), CoreError> {
    validate_required("track name", &track.name, MAX_TITLE_LENGTH)?;
    validate_length("location", &track.location, MAX_TITLE_LENGTH)?;
    validate_nation(&track.nation)?;
    validate_mod_info(&track.info)?;
    for layout in &track.layouts {
        validate_name("layout name", &layout.name)?;
        if layout.length_m <= 0 {
            return Err(CoreError::Validation(format!(
                "layout '{}' must have a positive length, got {}",
                layout.name, layout.length_m
            )));
        }
    }
    Ok(())
}
