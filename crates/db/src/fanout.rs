//! Fan-out reader: games plus their tag names in a bounded number of queries.
//!
//! Loads the parent rows once, then every link row of each relation for the
//! whole parent set in one call per relation, and stitches them in memory.
//! The number of source calls is at most `1 + TagKind::ALL.len()` no matter
//! how many games there are; an empty parent set stops after the first call.
//!
//! Against PostgreSQL all calls run on one read-only `REPEATABLE READ`
//! transaction, so a concurrent update is seen either entirely or not at all.

use std::collections::HashMap;

use async_trait::async_trait;
use gamespot_core::tags::TagKind;
use gamespot_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::models::game::{Game, GameView};
use crate::models::tag::TagLink;
use crate::repositories::{GameLinkRepo, GameRepo};

/// Which parent rows a fan-out read starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSelection {
    /// Every game, ordered by title.
    All,
    /// A single game by id.
    One(DbId),
}

/// Where the fan-out reader gets its rows from.
///
/// Each method is expected to cost exactly one round trip.
#[async_trait]
pub trait CatalogSource: Send {
    async fn load_games(&mut self, selection: GameSelection) -> Result<Vec<Game>, sqlx::Error>;

    async fn load_links(
        &mut self,
        kind: TagKind,
        game_ids: &[DbId],
    ) -> Result<Vec<TagLink>, sqlx::Error>;
}

#[async_trait]
impl CatalogSource for PgConnection {
    async fn load_games(&mut self, selection: GameSelection) -> Result<Vec<Game>, sqlx::Error> {
        match selection {
            GameSelection::All => GameRepo::list(&mut *self).await,
            GameSelection::One(id) => Ok(GameRepo::find_by_id(&mut *self, id)
                .await?
                .into_iter()
                .collect()),
        }
    }

    async fn load_links(
        &mut self,
        kind: TagKind,
        game_ids: &[DbId],
    ) -> Result<Vec<TagLink>, sqlx::Error> {
        GameLinkRepo::list_for_games(&mut *self, kind, game_ids).await
    }
}

/// Open a read-only transaction whose statements all share one snapshot.
///
/// The snapshot is taken by the first query, not by this call.
pub async fn begin_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

/// Run [`load_views`] on one pooled connection inside a snapshot transaction.
pub async fn load_snapshot(
    pool: &PgPool,
    selection: GameSelection,
) -> Result<Vec<GameView>, sqlx::Error> {
    let mut tx = begin_snapshot(pool).await?;
    let views = load_views(&mut *tx, selection).await?;
    tx.commit().await?;
    Ok(views)
}

/// Load games and attach their genre and platform names.
///
/// Output order follows the order returned by [`CatalogSource::load_games`].
pub async fn load_views<S>(
    source: &mut S,
    selection: GameSelection,
) -> Result<Vec<GameView>, sqlx::Error>
where
    S: CatalogSource + ?Sized,
{
    let games = source.load_games(selection).await?;
    if games.is_empty() {
        return Ok(Vec::new());
    }

    let game_ids: Vec<DbId> = games.iter().map(|g| g.id).collect();
    let genres = index_by_game(source.load_links(TagKind::Genre, &game_ids).await?);
    let platforms = index_by_game(source.load_links(TagKind::Platform, &game_ids).await?);

    Ok(stitch(games, genres, platforms))
}

/// Group link rows by game id, keeping row order within each group.
fn index_by_game(links: Vec<TagLink>) -> HashMap<DbId, Vec<String>> {
    let mut index: HashMap<DbId, Vec<String>> = HashMap::new();
    for link in links {
        index.entry(link.game_id).or_default().push(link.name);
    }
    index
}

/// Build one view per game; a game with no links gets empty name lists.
fn stitch(
    games: Vec<Game>,
    mut genres: HashMap<DbId, Vec<String>>,
    mut platforms: HashMap<DbId, Vec<String>>,
) -> Vec<GameView> {
    games
        .into_iter()
        .map(|game| GameView {
            genres: genres.remove(&game.id).unwrap_or_default(),
            platforms: platforms.remove(&game.id).unwrap_or_default(),
            game,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    /// In-memory source that counts how often it is asked for rows.
    struct CountingSource {
        games: Vec<Game>,
        genre_links: Vec<TagLink>,
        platform_links: Vec<TagLink>,
        calls: usize,
    }

    impl CountingSource {
        fn new(game_count: usize) -> Self {
            let games: Vec<Game> = (1..=game_count as DbId).map(game).collect();
            let genre_links = games
                .iter()
                .flat_map(|g| {
                    [
                        link(g.id, "RPG"),
                        link(g.id, "Strategy"),
                    ]
                })
                .collect();
            let platform_links = games.iter().map(|g| link(g.id, "PC")).collect();
            Self {
                games,
                genre_links,
                platform_links,
                calls: 0,
            }
        }
    }

    #[async_trait]
    impl CatalogSource for CountingSource {
        async fn load_games(&mut self, selection: GameSelection) -> Result<Vec<Game>, sqlx::Error> {
            self.calls += 1;
            Ok(match selection {
                GameSelection::All => self.games.clone(),
                GameSelection::One(id) => self.games.iter().filter(|g| g.id == id).cloned().collect(),
            })
        }

        async fn load_links(
            &mut self,
            kind: TagKind,
            game_ids: &[DbId],
        ) -> Result<Vec<TagLink>, sqlx::Error> {
            self.calls += 1;
            let links = match kind {
                TagKind::Genre => &self.genre_links,
                TagKind::Platform => &self.platform_links,
            };
            Ok(links
                .iter()
                .filter(|l| game_ids.contains(&l.game_id))
                .cloned()
                .collect())
        }
    }

    fn game(id: DbId) -> Game {
        Game {
            id,
            title: format!("Game {id:03}"),
            developer: "Studio".to_string(),
            price: 10.0,
            currency: "SEK".to_string(),
            release_year: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn link(game_id: DbId, name: &str) -> TagLink {
        TagLink {
            game_id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_catalog_stops_after_one_query() {
        let mut source = CountingSource::new(0);
        let views = load_views(&mut source, GameSelection::All).await.unwrap();
        assert!(views.is_empty());
        assert_eq!(source.calls, 1);
    }

    #[tokio::test]
    async fn query_count_does_not_grow_with_games() {
        for n in [1, 2, 50] {
            let mut source = CountingSource::new(n);
            let views = load_views(&mut source, GameSelection::All).await.unwrap();
            assert_eq!(views.len(), n);
            assert_eq!(source.calls, 3, "expected 3 calls for {n} games");
        }
    }

    #[tokio::test]
    async fn views_carry_their_own_links() {
        let mut source = CountingSource::new(3);
        let views = load_views(&mut source, GameSelection::All).await.unwrap();
        for view in &views {
            assert_eq!(view.genres, vec!["RPG", "Strategy"]);
            assert_eq!(view.platforms, vec!["PC"]);
        }
        let ids: Vec<DbId> = views.iter().map(|v| v.game.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn single_selection_uses_same_strategy() {
        let mut source = CountingSource::new(5);
        let views = load_views(&mut source, GameSelection::One(4)).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].game.id, 4);
        assert_eq!(source.calls, 3);

        let mut source = CountingSource::new(5);
        let views = load_views(&mut source, GameSelection::One(99)).await.unwrap();
        assert!(views.is_empty());
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn games_without_links_get_empty_lists() {
        let genres = index_by_game(vec![link(1, "RPG")]);
        let views = stitch(vec![game(1), game(2)], genres, HashMap::new());
        assert_eq!(views[0].genres, vec!["RPG"]);
        assert!(views[0].platforms.is_empty());
        assert!(views[1].genres.is_empty());
        assert!(views[1].platforms.is_empty());
    }

    #[test]
    fn index_keeps_row_order_per_game() {
        let index = index_by_game(vec![link(1, "A"), link(2, "B"), link(1, "C")]);
        assert_eq!(index[&1], vec!["A", "C"]);
        assert_eq!(index[&2], vec!["B"]);
    }
}
