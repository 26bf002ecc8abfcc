//! Repository for the `tracks` table with its owned layouts and tags.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use modrepo_core::error::CoreError;
use modrepo_core::track::{Layout, LayoutType, Track, TrackTag};
use modrepo_core::types::DbId;
use sqlx::AnyConnection;

use crate::dialect::{like_pattern, placeholders, MAX_IN_LIST};
use crate::models::track::{LayoutRow, NewTrackRow, TrackRow, TrackTagRow};
use crate::repositories::lookup::{ensure_author, ensure_nation, id_by_key};
use crate::repositories::TrackRepository;
use crate::{Db, Dialect, RepoResult};

const SELECT_TRACKS: &str = "SELECT t.id, t.name, n.name AS nation, n.code AS nation_code,
        a.name AS author, a.link AS author_link, t.location, t.year,
        t.download_link, t.premium, t.image, t.version, t.created_at, t.updated_at
     FROM tracks t
     JOIN nations n ON n.id = t.nation_id
     JOIN authors a ON a.id = t.author_id";

#[derive(Debug, Clone, Copy)]
enum TrackFilter<'a> {
    All,
    Nation(&'a str),
    LayoutType(LayoutType),
    Name(&'a str),
    Tag(TrackTag),
    ExactName(&'a str),
}

impl TrackFilter<'_> {
    fn condition(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Nation(_) => Some("n.name = ?"),
            Self::LayoutType(_) => Some("t.id IN (SELECT track_id FROM layouts WHERE category = ?)"),
            Self::Name(_) => Some("LOWER(t.name) LIKE LOWER(?)"),
            Self::Tag(_) => Some("t.id IN (SELECT track_id FROM track_tags WHERE tag = ?)"),
            Self::ExactName(_) => Some("t.name = ?"),
        }
    }

    fn argument(&self) -> Option<String> {
        match self {
            Self::All => None,
            Self::Nation(v) | Self::ExactName(v) => Some((*v).to_string()),
            Self::LayoutType(t) => Some(t.as_str().to_string()),
            Self::Name(fragment) => Some(like_pattern(fragment)),
            Self::Tag(tag) => Some(tag.as_str().to_string()),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::All => "any".to_string(),
            Self::Nation(v) => format!("nation '{v}'"),
            Self::LayoutType(t) => format!("layout type '{}'", t.as_str()),
            Self::Name(v) => format!("name containing '{v}'"),
            Self::Tag(tag) => format!("tag '{}'", tag.as_str()),
            Self::ExactName(v) => format!("name '{v}'"),
        }
    }
}

/// SQL-backed [`TrackRepository`].
#[derive(Debug, Clone)]
pub struct TrackRepo {
    db: Db,
}

impl TrackRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn select_tracks(
        &self,
        filter: TrackFilter<'_>,
        premium: bool,
    ) -> RepoResult<Vec<Track>> {
        let mut conditions: Vec<&str> = filter.condition().into_iter().collect();
        if !premium {
            conditions.push("t.premium = 0");
        }

        let mut query = SELECT_TRACKS.to_string();
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY ");
        query.push_str(&self.db.dialect.binary_order("t.name"));

        let sql = self.db.dialect.sql(&query);
        let mut q = sqlx::query_as::<_, TrackRow>(&sql);
        if let Some(argument) = filter.argument() {
            q = q.bind(argument);
        }
        let rows = q.fetch_all(&self.db.pool).await?;

        if rows.is_empty() {
            return Err(CoreError::not_found("track", filter.describe()).into());
        }

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut layouts = self.layouts_by_track(&ids).await?;
        let mut tags = self.tags_by_track(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let track_layouts = layouts.remove(&row.id).unwrap_or_default();
                let track_tags = tags.remove(&row.id).unwrap_or_default();
                row.into_entity(track_layouts, track_tags)
            })
            .collect())
    }

    async fn layouts_by_track(&self, ids: &[DbId]) -> RepoResult<HashMap<DbId, Vec<Layout>>> {
        let mut by_track: HashMap<DbId, Vec<Layout>> = HashMap::new();
        for chunk in ids.chunks(MAX_IN_LIST) {
            let query = format!(
                "SELECT track_id, name, length_m, category
                 FROM layouts
                 WHERE track_id IN ({})
                 ORDER BY track_id, position",
                placeholders(chunk.len())
            );
            let sql = self.db.dialect.sql(&query);
            let mut q = sqlx::query_as::<_, LayoutRow>(&sql);
            for id in chunk {
                q = q.bind(*id);
            }
            for row in q.fetch_all(&self.db.pool).await? {
                let track_id = row.track_id;
                by_track.entry(track_id).or_default().push(row.into_entity()?);
            }
        }
        Ok(by_track)
    }

    async fn tags_by_track(&self, ids: &[DbId]) -> RepoResult<HashMap<DbId, Vec<TrackTag>>> {
        let mut by_track: HashMap<DbId, Vec<TrackTag>> = HashMap::new();
        for chunk in ids.chunks(MAX_IN_LIST) {
            let query = format!(
                "SELECT track_id, tag FROM track_tags WHERE track_id IN ({})",
                placeholders(chunk.len())
            );
            let sql = self.db.dialect.sql(&query);
            let mut q = sqlx::query_as::<_, TrackTagRow>(&sql);
            for id in chunk {
                q = q.bind(*id);
            }
            for row in q.fetch_all(&self.db.pool).await? {
                let track_id = row.track_id;
                by_track.entry(track_id).or_default().push(row.into_entity()?);
            }
        }
        // Declaration order, independent of how each backend collates tag names.
        for tags in by_track.values_mut() {
            tags.sort_by_key(|tag| TrackTag::ALL.iter().position(|t| t == tag));
        }
        Ok(by_track)
    }
}

/// Write the layouts of a track in order, recording their position.
async fn insert_layouts(
    conn: &mut AnyConnection,
    dialect: Dialect,
    track_id: DbId,
    layouts: &[Layout],
) -> Result<(), sqlx::Error> {
    let query = dialect.sql(
        "INSERT INTO layouts (track_id, position, name, length_m, category) VALUES (?, ?, ?, ?, ?)",
    );
    for (position, layout) in (0_i32..).zip(layouts) {
        sqlx::query(&query)
            .bind(track_id)
            .bind(position)
            .bind(&layout.name)
            .bind(layout.length_m)
            .bind(layout.category.as_str())
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Add tags to a track, ignoring those it already has.
async fn insert_tags(
    conn: &mut AnyConnection,
    dialect: Dialect,
    track_id: DbId,
    tags: &[TrackTag],
) -> Result<(), sqlx::Error> {
    let query = dialect.insert_ignore("track_tags", &["track_id", "tag"]);
    for tag in tags {
        sqlx::query(&query)
            .bind(track_id)
            .bind(tag.as_str())
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl TrackRepository for TrackRepo {
    async fn insert_track(&self, track: &Track) -> RepoResult<()> {
        let dialect = self.db.dialect;
        let mut tx = self.db.pool.begin().await?;

        let nation_id = ensure_nation(&mut *tx, dialect, &track.nation).await?;
        let author_id = ensure_author(&mut *tx, dialect, &track.info.author).await?;
        let row = NewTrackRow::from_entity(track, nation_id, author_id);
        let now = Utc::now().timestamp();

        let query = format!(
            "INSERT INTO tracks ({}, created_at, updated_at) VALUES ({})",
            NewTrackRow::COLUMNS.join(", "),
            placeholders(NewTrackRow::COLUMNS.len() + 2)
        );
        sqlx::query(&dialect.sql(&query))
            .bind(row.name)
            .bind(row.nation_id)
            .bind(row.author_id)
            .bind(row.location)
            .bind(row.year)
            .bind(row.download_link)
            .bind(row.premium)
            .bind(row.image)
            .bind(row.version)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        let track_id = id_by_key(&mut *tx, dialect, "tracks", "name", &track.name).await?;

        insert_layouts(&mut *tx, dialect, track_id, &track.layouts).await?;
        insert_tags(&mut *tx, dialect, track_id, &track.tags).await?;

        tx.commit().await?;
        tracing::debug!(track_id, name = %track.name, "Track inserted");
        Ok(())
    }

    async fn update_track(&self, track: &Track) -> RepoResult<bool> {
        let track_id = track
            .id
            .ok_or_else(|| CoreError::Validation("track id is required for update".into()))?;
        let dialect = self.db.dialect;
        let mut tx = self.db.pool.begin().await?;

        let stored_version =
            sqlx::query_scalar::<_, i32>(&dialect.sql("SELECT version FROM tracks WHERE id = ?"))
                .bind(track_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| CoreError::not_found("track", track_id))?;

        let nation_id = ensure_nation(&mut *tx, dialect, &track.nation).await?;
        let author_id = ensure_author(&mut *tx, dialect, &track.info.author).await?;
        let row = NewTrackRow::from_entity(track, nation_id, author_id);

        let assignments: Vec<String> = NewTrackRow::COLUMNS
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect();
        let query = format!("UPDATE tracks SET {} WHERE id = ?", assignments.join(", "));
        sqlx::query(&dialect.sql(&query))
            .bind(row.name)
            .bind(row.nation_id)
            .bind(row.author_id)
            .bind(row.location)
            .bind(row.year)
            .bind(row.download_link)
            .bind(row.premium)
            .bind(row.image)
            .bind(row.version)
            .bind(track_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(&dialect.sql("DELETE FROM layouts WHERE track_id = ?"))
            .bind(track_id)
            .execute(&mut *tx)
            .await?;
        insert_layouts(&mut *tx, dialect, track_id, &track.layouts).await?;
        insert_tags(&mut *tx, dialect, track_id, &track.tags).await?;

        tx.commit().await?;
        let changed = stored_version != track.version;
        tracing::debug!(track_id, stored_version, version = track.version, changed, "Track updated");
        Ok(changed)
    }

    async fn select_all_tracks(&self, premium: bool) -> RepoResult<Vec<Track>> {
        self.select_tracks(TrackFilter::All, premium).await
    }

    async fn select_tracks_by_nation(
        &self,
        nation: &str,
        premium: bool,
    ) -> RepoResult<Vec<Track>> {
        self.select_tracks(TrackFilter::Nation(nation), premium)
            .await
    }

    async fn select_tracks_by_layout_type(
        &self,
        layout_type: LayoutType,
        premium: bool,
    ) -> RepoResult<Vec<Track>> {
        self.select_tracks(TrackFilter::LayoutType(layout_type), premium)
            .await
    }

    async fn select_tracks_by_name(
        &self,
        fragment: &str,
        premium: bool,
    ) -> RepoResult<Vec<Track>> {
        self.select_tracks(TrackFilter::Name(fragment), premium)
            .await
    }

    async fn select_tracks_by_tag(&self, tag: TrackTag, premium: bool) -> RepoResult<Vec<Track>> {
        self.select_tracks(TrackFilter::Tag(tag), premium).await
    }

    async fn select_track_by_name(&self, name: &str) -> RepoResult<Track> {
        let mut tracks = self
            .select_tracks(TrackFilter::ExactName(name), true)
            .await?;
        tracks
            .pop()
            .ok_or_else(|| CoreError::not_found("track", format!("name '{name}'")).into())
    }
}
