//! Link Manager for Linkstash.
//!
//! Implements `LinkManagerTrait` — the record-oriented persistence contract
//! for saved links, backed by SQLite via `rusqlite`.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use uuid::Uuid;

use crate::database::connection::Database;
use crate::types::errors::LinkError;
use crate::types::link::{Link, NewLink, TagSet};

/// Trait defining the persistence operations for saved links.
///
/// Every operation is scoped to an owner; a link is never visible to or
/// mutable by anyone but the user it belongs to.
pub trait LinkManagerTrait {
    /// Lists all links for the owner, newest first.
    fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Link>, LinkError>;
    /// Inserts a record, returning it with the assigned id and timestamp.
    fn insert(&self, record: NewLink) -> Result<Link, LinkError>;
    /// Deletes a link by id, scoped to the owner.
    fn delete(&self, id: &str, owner_id: &str) -> Result<(), LinkError>;
    /// Replaces a link's tag set, scoped to the owner.
    fn update_tags(&self, id: &str, owner_id: &str, tags: &TagSet) -> Result<(), LinkError>;
}

/// Link manager backed by a SQLite database.
pub struct LinkManager {
    db: Arc<Database>,
}

impl LinkManager {
    /// Creates a new `LinkManager` over the shared database handle.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn encode_tags(tags: &TagSet) -> Result<String, LinkError> {
        serde_json::to_string(tags).map_err(|e| LinkError::DatabaseError(e.to_string()))
    }

    /// Reads a single `Link` row into a struct.
    fn row_to_link(row: &rusqlite::Row) -> rusqlite::Result<Link> {
        let tags_json: String = row.get(6)?;
        Ok(Link {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            url: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            image: row.get(5)?,
            tags: serde_json::from_str(&tags_json).unwrap_or_default(),
            created_at: row.get(7)?,
        })
    }
}

impl LinkManagerTrait for LinkManager {
    /// Lists links for the owner ordered by creation time descending.
    ///
    /// Links inserted within the same second keep newest-first order via
    /// the rowid tiebreak.
    fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Link>, LinkError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT id, owner_id, url, title, description, image, tags, created_at \
                 FROM links WHERE owner_id = ?1 ORDER BY created_at DESC, rowid DESC",
            )
            .map_err(|e| LinkError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(params![owner_id], Self::row_to_link)
            .map_err(|e| LinkError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| LinkError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    /// Inserts a new link. Returns the stored record with id and timestamp.
    fn insert(&self, record: NewLink) -> Result<Link, LinkError> {
        let id = Uuid::new_v4().to_string();
        let created_at = Self::now();
        let tags_json = Self::encode_tags(&record.tags)?;

        self.db
            .connection()
            .execute(
                "INSERT INTO links (id, owner_id, url, title, description, image, tags, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    id,
                    record.owner_id,
                    record.url,
                    record.title,
                    record.description,
                    record.image,
                    tags_json,
                    created_at
                ],
            )
            .map_err(|e| LinkError::DatabaseError(e.to_string()))?;

        Ok(Link {
            id,
            owner_id: record.owner_id,
            url: record.url,
            title: record.title,
            description: record.description,
            image: record.image,
            tags: record.tags,
            created_at,
        })
    }

    /// Deletes a link by ID for the given owner.
    fn delete(&self, id: &str, owner_id: &str) -> Result<(), LinkError> {
        let affected = self
            .db
            .connection()
            .execute(
                "DELETE FROM links WHERE id = ?1 AND owner_id = ?2",
                params![id, owner_id],
            )
            .map_err(|e| LinkError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(LinkError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Replaces the tag set of an existing link for the given owner.
    fn update_tags(&self, id: &str, owner_id: &str, tags: &TagSet) -> Result<(), LinkError> {
        let tags_json = Self::encode_tags(tags)?;

        let affected = self
            .db
            .connection()
            .execute(
                "UPDATE links SET tags = ?1 WHERE id = ?2 AND owner_id = ?3",
                params![tags_json, id, owner_id],
            )
            .map_err(|e| LinkError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(LinkError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
