//! Repository for the `game_genres` and `game_platforms` junction tables.
//!
//! Writes use a full-replace strategy: the desired names are resolved, every
//! existing link for the relation is deleted, and the de-duplicated id set is
//! inserted in one statement. Reads load links for a whole set of games at
//! once.

use std::collections::HashSet;

use gamespot_core::tags::TagKind;
use gamespot_core::types::DbId;
use sqlx::{PgExecutor, Postgres, Transaction};

use super::tag_repo::{tables, TagRepo};
use crate::error::StoreError;
use crate::models::tag::TagLink;

/// Association synchronizer and batched link reader.
pub struct GameLinkRepo;

impl GameLinkRepo {
    /// Make the persisted link set of `game_id` for `kind` equal to `names`.
    ///
    /// Runs inside the caller's transaction and never commits. Name
    /// resolution happens before anything is deleted, so an unknown name
    /// leaves the links untouched (and the caller rolls back regardless).
    /// Returns the number of links written.
    pub async fn sync(
        tx: &mut Transaction<'_, Postgres>,
        game_id: DbId,
        kind: TagKind,
        names: &[String],
    ) -> Result<usize, StoreError> {
        let resolved = TagRepo::resolve_all(&mut **tx, kind, names).await?;

        let mut seen = HashSet::with_capacity(resolved.len());
        let tag_ids: Vec<DbId> = resolved.into_iter().filter(|id| seen.insert(*id)).collect();

        let t = tables(kind);

        let delete = format!("DELETE FROM {} WHERE game_id = $1", t.link_table);
        sqlx::query(&delete)
            .bind(game_id)
            .execute(&mut **tx)
            .await?;

        if !tag_ids.is_empty() {
            let insert = format!(
                "INSERT INTO {} (game_id, {}) SELECT $1, UNNEST($2::BIGINT[])",
                t.link_table, t.tag_column
            );
            sqlx::query(&insert)
                .bind(game_id)
                .bind(&tag_ids)
                .execute(&mut **tx)
                .await?;
        }

        tracing::debug!(game_id, kind = %kind, tag_count = tag_ids.len(), "Synchronized game links");
        Ok(tag_ids.len())
    }

    /// Load every link of `kind` for the given games, joined to tag names.
    ///
    /// One query regardless of how many ids are passed. Rows are ordered by
    /// game id, then tag name.
    pub async fn list_for_games<'e, E>(
        executor: E,
        kind: TagKind,
        game_ids: &[DbId],
    ) -> Result<Vec<TagLink>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let t = tables(kind);
        let query = format!(
            "SELECT l.game_id, t.name \
             FROM {link} l \
             JOIN {tag} t ON t.id = l.{column} \
             WHERE l.game_id = ANY($1) \
             ORDER BY l.game_id, t.name",
            link = t.link_table,
            tag = t.tag_table,
            column = t.tag_column,
        );
        sqlx::query_as::<_, TagLink>(&query)
            .bind(game_ids)
            .fetch_all(executor)
            .await
    }
}
