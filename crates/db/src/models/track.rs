//! Track, layout and tag rows.

use modrepo_core::catalog::{Author, ModInfo, Nation};
use modrepo_core::error::CoreError;
use modrepo_core::track::{Layout, LayoutType, Track, TrackTag};
use modrepo_core::types::{timestamp_from_unix, DbId};
use sqlx::FromRow;

use super::{flag_from_bool, flag_to_bool, stored};

/// A track listing row joined with its nation and author.
#[derive(Debug, Clone, FromRow)]
pub struct TrackRow {
    pub id: DbId,
    pub name: String,
    pub nation: String,
    pub nation_code: Option<String>,
    pub author: String,
    pub author_link: String,
    pub location: String,
    pub year: i32,
    pub download_link: String,
    pub premium: i16,
    pub image: String,
    pub version: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TrackRow {
    pub fn into_entity(self, layouts: Vec<Layout>, tags: Vec<TrackTag>) -> Track {
        Track {
            id: Some(self.id),
            info: ModInfo {
                download_link: self.download_link,
                premium: flag_to_bool(self.premium),
                image: self.image,
                author: Author {
                    name: self.author,
                    link: self.author_link,
                },
            },
            name: self.name,
            nation: Nation {
                name: self.nation,
                code: self.nation_code,
            },
            location: self.location,
            year: self.year,
            layouts,
            tags,
            version: self.version,
            created_at: Some(timestamp_from_unix(self.created_at)),
            updated_at: Some(timestamp_from_unix(self.updated_at)),
        }
    }
}

/// A row from `layouts`. `position` orders the layouts of one track.
#[derive(Debug, Clone, FromRow)]
pub struct LayoutRow {
    pub track_id: DbId,
    pub name: String,
    pub length_m: i32,
    pub category: String,
}

impl LayoutRow {
    pub fn into_entity(self) -> Result<Layout, CoreError> {
        Ok(Layout {
            category: stored("category", LayoutType::from_str(&self.category))?,
            name: self.name,
            length_m: self.length_m,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TrackTagRow {
    pub track_id: DbId,
    pub tag: String,
}

impl TrackTagRow {
    pub fn into_entity(self) -> Result<TrackTag, CoreError> {
        stored("tag", TrackTag::from_str(&self.tag))
    }
}

/// Values written to `tracks` on insert and update.
///
/// Timestamps are not part of the row: insert sets both explicitly and
/// update leaves them untouched.
#[derive(Debug)]
pub struct NewTrackRow<'a> {
    pub name: &'a str,
    pub nation_id: DbId,
    pub author_id: DbId,
    pub location: &'a str,
    pub year: i32,
    pub download_link: &'a str,
    pub premium: i16,
    pub image: &'a str,
    pub version: i32,
}

impl<'a> NewTrackRow<'a> {
    pub const COLUMNS: [&'static str; 9] = [
        "name",
        "nation_id",
        "author_id",
        "location",
        "year",
        "download_link",
        "premium",
        "image",
        "version",
    ];

    pub fn from_entity(track: &'a Track, nation_id: DbId, author_id: DbId) -> Self {
        Self {
            name: &track.name,
            nation_id,
            author_id,
            location: &track.location,
            year: track.year,
            download_link: &track.info.download_link,
            premium: flag_from_bool(track.info.premium),
            image: &track.info.image,
            version: track.version,
        }
    }
}
