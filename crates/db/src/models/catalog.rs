//! Nation and author rows.

use modrepo_core::catalog::{Author, Nation};
use modrepo_core::types::DbId;
use sqlx::FromRow;

/// A row from the `nations` table.
#[derive(Debug, Clone, FromRow)]
pub struct NationRow {
    pub id: DbId,
    pub name: String,
    pub code: Option<String>,
}

impl NationRow {
    pub fn into_entity(self) -> Nation {
        Nation {
            name: self.name,
            code: self.code,
        }
    }
}

/// A row from the `authors` table.
#[derive(Debug, Clone, FromRow)]
pub struct AuthorRow {
    pub id: DbId,
    pub name: String,
    pub link: String,
}

impl AuthorRow {
    pub fn into_entity(self) -> Author {
        Author {
            name: self.name,
            link: self.link,
        }
    }
}
