//! Repository for the `games` table.
//!
//! The record store: owns the scalar columns and the game lifecycle, and
//! delegates link reconciliation to [`GameLinkRepo`] inside the same
//! transaction. Every write is all-or-nothing.

use gamespot_core::catalog::GameDraft;
use gamespot_core::tags::TagKind;
use gamespot_core::types::DbId;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use super::{finish_transaction, GameLinkRepo};
use crate::error::StoreError;
use crate::fanout::{self, GameSelection};
use crate::models::game::{Game, GameView};

/// Column list for `games` queries.
const COLUMNS: &str = "id, title, developer, price, currency, release_year, created_at, updated_at";

/// Provides lifecycle operations for games and entry points to the fan-out reader.
pub struct GameRepo;

impl GameRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a game and link its genres and platforms in one transaction.
    ///
    /// Returns the new id. On any failure, including an unknown tag name,
    /// nothing is persisted.
    pub async fn create(pool: &PgPool, draft: &GameDraft) -> Result<DbId, StoreError> {
        let mut tx = pool.begin().await?;
        let outcome = Self::create_inner(&mut tx, draft).await;
        finish_transaction(tx, outcome).await
    }

    /// Overwrite a game's scalar fields and replace both link sets.
    ///
    /// The scalar update runs first; a later lookup failure rolls it back
    /// too. Returns `false` when no game has this id, in which case nothing
    /// is written and the call still succeeds.
    pub async fn update(pool: &PgPool, id: DbId, draft: &GameDraft) -> Result<bool, StoreError> {
        let mut tx = pool.begin().await?;
        let outcome = Self::update_inner(&mut tx, id, draft).await;
        finish_transaction(tx, outcome).await
    }

    /// Delete a game. Its link rows go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Scalar reads
    // -----------------------------------------------------------------------

    /// List all games ordered by title (database collation), then id.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<Game>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM games ORDER BY title, id");
        sqlx::query_as::<_, Game>(&query).fetch_all(executor).await
    }

    /// Find a game by its ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Game>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Count all games.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM games")
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Fan-out reads
    // -----------------------------------------------------------------------

    /// List all games with their genre and platform names.
    ///
    /// Three queries in total, independent of the number of games, all
    /// reading the same snapshot.
    pub async fn list_with_tags(pool: &PgPool) -> Result<Vec<GameView>, sqlx::Error> {
        fanout::load_snapshot(pool, GameSelection::All).await
    }

    /// Find one game with its genre and platform names.
    pub async fn find_with_tags(pool: &PgPool, id: DbId) -> Result<Option<GameView>, sqlx::Error> {
        let mut views = fanout::load_snapshot(pool, GameSelection::One(id)).await?;
        Ok(views.pop())
    }

    // -----------------------------------------------------------------------
    // Transaction bodies
    // -----------------------------------------------------------------------

    async fn create_inner(
        tx: &mut Transaction<'_, Postgres>,
        draft: &GameDraft,
    ) -> Result<DbId, StoreError> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO games (title, developer, price, currency, release_year) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(&draft.title)
        .bind(&draft.developer)
        .bind(draft.price)
        .bind(&draft.currency)
        .bind(draft.release_year)
        .fetch_one(&mut **tx)
        .await?;

        Self::sync_all(tx, id, draft).await?;

        tracing::info!(game_id = id, title = %draft.title, "Game created");
        Ok(id)
    }

    async fn update_inner(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        draft: &GameDraft,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE games SET \
                title = $2, \
                developer = $3, \
                price = $4, \
                currency = $5, \
                release_year = $6, \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.developer)
        .bind(draft.price)
        .bind(&draft.currency)
        .bind(draft.release_year)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(game_id = id, "Update matched no game; nothing written");
            return Ok(false);
        }

        Self::sync_all(tx, id, draft).await?;

        tracing::info!(game_id = id, "Game updated");
        Ok(true)
    }

    async fn sync_all(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        draft: &GameDraft,
    ) -> Result<(), StoreError> {
        for kind in TagKind::ALL {
            GameLinkRepo::sync(tx, id, kind, draft.names_for(kind)).await?;
        }
        Ok(())
    }
}
