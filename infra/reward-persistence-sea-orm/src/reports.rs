use std::collections::{BTreeSet, HashMap};

use reward_persistence_sea_orm_entities::{level, level_prize, player_level, prize};
use reward_server_app::domain::{
    PlayerId, PlayerLevelId, RepoError,
    report::{PlayerLevelReportRepository, PlayerLevelReportRow},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::{create_db_pool, repo_error};

pub struct PlayerLevelReportRepositoryImpl {
    db: DatabaseConnection,
}

impl PlayerLevelReportRepositoryImpl {
    pub async fn new() -> Self {
        Self::with_connection(create_db_pool().await)
    }

    pub fn with_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn level_titles(&self, level_ids: &[i64]) -> Result<HashMap<i64, String>, RepoError> {
        let levels = level::Entity::find()
            .filter(level::Column::Id.is_in(level_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(repo_error)?;
        Ok(levels.into_iter().map(|l| (l.id, l.title)).collect())
    }

    /// Title of the first configured prize of every level that has one.
    async fn prize_titles(&self, level_ids: &[i64]) -> Result<HashMap<i64, String>, RepoError> {
        let level_prizes = level_prize::Entity::find()
            .filter(level_prize::Column::LevelId.is_in(level_ids.iter().copied()))
            .order_by_asc(level_prize::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        let mut prize_of_level: HashMap<i64, i64> = HashMap::new();
        for lp in &level_prizes {
            prize_of_level.entry(lp.level_id).or_insert(lp.prize_id);
        }
        if prize_of_level.is_empty() {
            return Ok(HashMap::new());
        }

        let prize_ids: BTreeSet<i64> = prize_of_level.values().copied().collect();
        let prizes: HashMap<i64, String> = prize::Entity::find()
            .filter(prize::Column::Id.is_in(prize_ids))
            .all(&self.db)
            .await
            .map_err(repo_error)?
            .into_iter()
            .map(|p| (p.id, p.title))
            .collect();

        Ok(prize_of_level
            .into_iter()
            .filter_map(|(level_id, prize_id)| {
                prizes.get(&prize_id).map(|title| (level_id, title.clone()))
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl PlayerLevelReportRepository for PlayerLevelReportRepositoryImpl {
    async fn fetch_player_level_page(
        &self,
        after: Option<PlayerLevelId>,
        limit: usize,
    ) -> Result<Vec<PlayerLevelReportRow>, RepoError> {
        let mut query = player_level::Entity::find()
            .order_by_asc(player_level::Column::Id)
            .limit(limit as u64);
        if let Some(after) = after {
            query = query.filter(player_level::Column::Id.gt(after.0));
        }
        let page = query.all(&self.db).await.map_err(repo_error)?;
        if page.is_empty() {
            return Ok(Vec::new());
        }

        let level_ids: Vec<i64> = page
            .iter()
            .map(|pl| pl.level_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let level_titles = self.level_titles(&level_ids).await?;
        let prize_titles = self.prize_titles(&level_ids).await?;

        Ok(page
            .into_iter()
            .map(|pl| {
                let level_title = level_titles.get(&pl.level_id).cloned().unwrap_or_else(|| {
                    log::warn!("Player level {} references missing level {}", pl.id, pl.level_id);
                    String::new()
                });
                PlayerLevelReportRow {
                    player_level_id: PlayerLevelId(pl.id),
                    player_id: PlayerId(pl.player_id),
                    level_title,
                    is_completed: pl.is_completed,
                    prize_title: prize_titles.get(&pl.level_id).cloned(),
                }
            })
            .collect())
    }
}
