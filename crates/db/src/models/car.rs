//! Car, brand and category rows.

use modrepo_core::car::{Car, CarBrand, CarCategory, Drivetrain, Transmission};
use modrepo_core::catalog::{Author, ModInfo, Nation};
use modrepo_core::error::CoreError;
use modrepo_core::types::DbId;
use sqlx::FromRow;

use super::{flag_from_bool, flag_to_bool, stored};

/// A car listing row: the `cars` columns plus the brand and author names.
///
/// Brand nation, author link and categories are resolved separately and
/// supplied to [`CarRow::into_entity`].
#[derive(Debug, Clone, FromRow)]
pub struct CarRow {
    pub id: DbId,
    pub model_name: String,
    pub brand: String,
    pub author: String,
    pub download_link: String,
    pub premium: i16,
    pub image: String,
    pub drivetrain: String,
    pub transmission: String,
    pub year: i32,
    pub torque: i32,
    pub top_speed: i32,
    pub weight: i32,
    pub bhp: i32,
}

impl CarRow {
    pub fn into_entity(
        self,
        brand: CarBrand,
        author: Author,
        categories: Vec<CarCategory>,
    ) -> Result<Car, CoreError> {
        Ok(Car {
            info: ModInfo {
                download_link: self.download_link,
                premium: flag_to_bool(self.premium),
                image: self.image,
                author,
            },
            model_name: self.model_name,
            brand,
            categories,
            drivetrain: stored("drivetrain", Drivetrain::from_str(&self.drivetrain))?,
            transmission: stored("transmission", Transmission::from_str(&self.transmission))?,
            year: self.year,
            torque: self.torque,
            top_speed: self.top_speed,
            weight: self.weight,
            bhp: self.bhp,
        })
    }
}

/// A brand joined with its nation.
#[derive(Debug, Clone, FromRow)]
pub struct BrandRow {
    pub name: String,
    pub nation: String,
    pub nation_code: Option<String>,
}

impl BrandRow {
    pub fn into_entity(self) -> CarBrand {
        CarBrand {
            name: self.name,
            nation: Nation {
                name: self.nation,
                code: self.nation_code,
            },
        }
    }
}

/// One car-to-category association, with the category resolved to its name.
#[derive(Debug, Clone, FromRow)]
pub struct CarCategoryLinkRow {
    pub car_id: DbId,
    pub name: String,
}

/// Values bound when inserting into `cars`.
#[derive(Debug)]
pub struct NewCarRow<'a> {
    pub model_name: &'a str,
    pub brand_id: DbId,
    pub author_id: DbId,
    pub download_link: &'a str,
    pub premium: i16,
    pub image: &'a str,
    pub drivetrain: &'static str,
    pub transmission: &'static str,
    pub year: i32,
    pub torque: i32,
    pub top_speed: i32,
    pub weight: i32,
    pub bhp: i32,
}

impl<'a> NewCarRow<'a> {
    /// Column order matching the fields above.
    pub const COLUMNS: [&'static str; 13] = [
        "model_name",
        "brand_id",
        "author_id",
        "download_link",
        "premium",
        "image",
        "drivetrain",
        "transmission",
        "year",
        "torque",
        "top_speed",
        "weight",
        "bhp",
    ];

    pub fn from_entity(car: &'a Car, brand_id: DbId, author_id: DbId) -> Self {
        Self {
            model_name: &car.model_name,
            brand_id,
            author_id,
            download_link: &car.info.download_link,
            premium: flag_from_bool(car.info.premium),
            image: &car.info.image,
            drivetrain: car.drivetrain.as_str(),
            transmission: car.transmission.as_str(),
            year: car.year,
            torque: car.torque,
            top_speed: car.top_speed,
            weight: car.weight,
            bhp: car.bhp,
        }
    }
}
