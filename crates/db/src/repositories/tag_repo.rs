//! Repository for the `genres` and `platforms` reference tables.
//!
//! Acts as the lookup resolver for the write path: tag names map to existing
//! ids, and a name without a row is an error, never an implicit insert.

use std::collections::HashMap;

use gamespot_core::tags::TagKind;
use gamespot_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::StoreError;
use crate::models::tag::Tag;

/// Table and column names backing one tag relation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RelationTables {
    /// Reference table holding `(id, name)` rows.
    pub tag_table: &'static str,
    /// Junction table holding `(game_id, <tag_column>)` rows.
    pub link_table: &'static str,
    /// Tag id column inside `link_table`.
    pub tag_column: &'static str,
}

pub(crate) fn tables(kind: TagKind) -> RelationTables {
    match kind {
        TagKind::Genre => RelationTables {
            tag_table: "genres",
            link_table: "game_genres",
            tag_column: "genre_id",
        },
        TagKind::Platform => RelationTables {
            tag_table: "platforms",
            link_table: "game_platforms",
            tag_column: "platform_id",
        },
    }
}

/// Read-only access to tag reference rows.
pub struct TagRepo;

impl TagRepo {
    /// List every tag of one kind, ordered by name.
    pub async fn list(pool: &PgPool, kind: TagKind) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT id, name FROM {} ORDER BY name",
            tables(kind).tag_table
        );
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Resolve one tag name to its id by exact match.
    ///
    /// Fails with [`StoreError::UnknownTag`] when no row matches.
    pub async fn resolve(
        conn: &mut PgConnection,
        kind: TagKind,
        name: &str,
    ) -> Result<DbId, StoreError> {
        let query = format!("SELECT id FROM {} WHERE name = $1", tables(kind).tag_table);
        sqlx::query_scalar::<_, DbId>(&query)
            .bind(name)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| StoreError::UnknownTag {
                kind,
                name: name.to_string(),
            })
    }

    /// Resolve every name in one query, returning ids in input order.
    ///
    /// Duplicate names yield duplicate ids. The first name (in input order)
    /// without a matching row fails the whole call; no partial result is
    /// returned.
    pub async fn resolve_all(
        conn: &mut PgConnection,
        kind: TagKind,
        names: &[String],
    ) -> Result<Vec<DbId>, StoreError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT id, name FROM {} WHERE name = ANY($1)",
            tables(kind).tag_table
        );
        let rows = sqlx::query_as::<_, Tag>(&query)
            .bind(names)
            .fetch_all(conn)
            .await?;
        let by_name: HashMap<String, DbId> = rows.into_iter().map(|t| (t.name, t.id)).collect();

        names
            .iter()
            .map(|name| {
                by_name
                    .get(name)
                    .copied()
                    .ok_or_else(|| StoreError::UnknownTag {
                        kind,
                        name: name.clone(),
                    })
            })
            .collect()
    }
}
