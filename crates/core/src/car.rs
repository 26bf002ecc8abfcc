//! Car mod entity, its brand and category, and drivetrain/transmission
//! enumerations.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    validate_mod_info, validate_name, validate_nation, validate_required, ModInfo, Nation,
    MAX_TITLE_LENGTH,
};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Wheels receiving engine torque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Drivetrain {
    #[serde(rename = "RWD")]
    Rwd,
    #[serde(rename = "FWD")]
    Fwd,
    #[serde(rename = "AWD")]
    Awd,
}

const VALID_DRIVETRAINS: &[&str] = &["RWD", "FWD", "AWD"];

impl Drivetrain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rwd => "RWD",
            Self::Fwd => "FWD",
            Self::Awd => "AWD",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "RWD" => Ok(Self::Rwd),
            "FWD" => Ok(Self::Fwd),
            "AWD" => Ok(Self::Awd),
            _ => Err(CoreError::Validation(format!(
                "Invalid drivetrain '{s}'. Must be one of: {}",
                VALID_DRIVETRAINS.join(", ")
            ))),
        }
    }
}

/// Gearbox type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transmission {
    Sequential,
    Manual,
    Automatic,
}

const VALID_TRANSMISSIONS: &[&str] = &["Sequential", "Manual", "Automatic"];

impl Transmission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::Manual => "Manual",
            Self::Automatic => "Automatic",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "Sequential" => Ok(Self::Sequential),
            "Manual" => Ok(Self::Manual),
            "Automatic" => Ok(Self::Automatic),
            _ => Err(CoreError::Validation(format!(
                "Invalid transmission '{s}'. Must be one of: {}",
                VALID_TRANSMISSIONS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// Car manufacturer. The name is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarBrand {
    pub name: String,
    pub nation: Nation,
}

/// Free-form car class such as `"GT3"` or `"Sedan"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarCategory {
    pub name: String,
}

impl CarCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A car mod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    #[serde(flatten)]
    pub info: ModInfo,
    /// Unique across the catalog.
    pub model_name: String,
    pub brand: CarBrand,
    #[serde(default)]
    pub categories: Vec<CarCategory>,
    pub drivetrain: Drivetrain,
    pub transmission: Transmission,
    pub year: i32,
    /// Newton-metres.
    pub torque: i32,
    /// km/h.
    pub top_speed: i32,
    /// Kilograms.
    pub weight: i32,
    pub bhp: i32,
}

/// Validate a car before it is written.
pub fn validate_car(car: &Car) -> Result<(), CoreError> {
    validate_required("model name", &car.model_name, MAX_TITLE_LENGTH)?;
    validate_name("brand name", &car.brand.name)?;
    validate_nation(&car.brand.nation)?;
    validate_mod_info(&car.info)?;
    for category in &car.categories {
        validate_name("category name", &category.name)?;
    }

    let metrics = [
        ("year", car.year),
        ("torque", car.torque),
        ("top speed", car.top_speed),
        ("weight", car.weight),
        ("bhp", car.bhp),
    ];
    if let Some((field, value)) = metrics.iter().find(|(_, v)| *v < 0) {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}
