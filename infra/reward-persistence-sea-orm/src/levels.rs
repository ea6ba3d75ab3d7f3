use std::sync::Arc;

use chrono::{DateTime, Utc};
use reward_persistence_sea_orm_entities::{level, level_prize, player, player_level, prize};
use reward_server_app::domain::{
    LevelId, LevelPrizeId, PlayerId, PlayerLevelId, PrizeId, RepoCreateError, RepoError,
    RepoRetrieveError, RepoUpdateError,
    level::{Level, LevelPrize, LevelRepository, NewPlayerLevel, PlayerLevel, Prize},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::{create_db_pool, create_error, repo_error, retrieve_error};

pub struct LevelRepositoryImpl {
    db: DatabaseConnection,
    level_cache: Arc<moka::sync::Cache<LevelId, Level>>,
    prize_cache: Arc<moka::sync::Cache<PrizeId, Prize>>,
}

impl LevelRepositoryImpl {
    pub async fn new() -> Self {
        Self::with_connection(create_db_pool().await)
    }

    pub fn with_connection(db: DatabaseConnection) -> Self {
        let level_cache = Arc::new(
            moka::sync::Cache::builder()
                .max_capacity(10_000)
                .time_to_live(std::time::Duration::from_secs(60 * 60 * 12))
                .build(),
        );
        let prize_cache = Arc::new(
            moka::sync::Cache::builder()
                .max_capacity(10_000)
                .time_to_live(std::time::Duration::from_secs(60 * 60 * 12))
                .build(),
        );
        Self {
            db,
            level_cache,
            prize_cache,
        }
    }

    fn model_to_level_prize(model: level_prize::Model) -> LevelPrize {
        LevelPrize {
            id: LevelPrizeId(model.id),
            level_id: LevelId(model.level_id),
            prize_id: PrizeId(model.prize_id),
            received: model.received,
        }
    }

    fn model_to_player_level(model: player_level::Model) -> PlayerLevel {
        PlayerLevel {
            id: PlayerLevelId(model.id),
            player_id: PlayerId(model.player_id),
            level_id: LevelId(model.level_id),
            completed: model.completed,
            is_completed: model.is_completed,
            score: model.score,
        }
    }

    async fn ensure_exists<E: EntityTrait>(
        &self,
        find: sea_orm::Select<E>,
    ) -> Result<(), RepoCreateError> {
        match find.one(&self.db).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(RepoCreateError::NotFound),
            Err(e) => Err(create_error(e)),
        }
    }
}

#[async_trait::async_trait]
impl LevelRepository for LevelRepositoryImpl {
    async fn create_level(&self, title: String, order: i32) -> Result<Level, RepoError> {
        let active_model = level::ActiveModel {
            id: NotSet,
            title: Set(title),
            order: Set(order),
        };
        let model = active_model.insert(&self.db).await.map_err(repo_error)?;
        let level = Level {
            id: LevelId(model.id),
            title: model.title,
            order: model.order,
        };
        self.level_cache.insert(level.id, level.clone());
        Ok(level)
    }

    async fn get_level(&self, level_id: LevelId) -> Result<Level, RepoRetrieveError> {
        if let Some(cached) = self.level_cache.get(&level_id) {
            return Ok(cached);
        }
        let model = level::Entity::find_by_id(level_id.0)
            .one(&self.db)
            .await
            .map_err(retrieve_error)?
            .ok_or(RepoRetrieveError::NotFound)?;
        let level = Level {
            id: LevelId(model.id),
            title: model.title,
            order: model.order,
        };
        self.level_cache.insert(level_id, level.clone());
        Ok(level)
    }

    async fn create_prize(&self, title: String) -> Result<Prize, RepoError> {
        let active_model = prize::ActiveModel {
            id: NotSet,
            title: Set(title),
        };
        let model = active_model.insert(&self.db).await.map_err(repo_error)?;
        let prize = Prize {
            id: PrizeId(model.id),
            title: model.title,
        };
        self.prize_cache.insert(prize.id, prize.clone());
        Ok(prize)
    }

    async fn get_prize(&self, prize_id: PrizeId) -> Result<Prize, RepoRetrieveError> {
        if let Some(cached) = self.prize_cache.get(&prize_id) {
            return Ok(cached);
        }
        let model = prize::Entity::find_by_id(prize_id.0)
            .one(&self.db)
            .await
            .map_err(retrieve_error)?
            .ok_or(RepoRetrieveError::NotFound)?;
        let prize = Prize {
            id: PrizeId(model.id),
            title: model.title,
        };
        self.prize_cache.insert(prize_id, prize.clone());
        Ok(prize)
    }

    async fn create_level_prize(
        &self,
        level_id: LevelId,
        prize_id: PrizeId,
    ) -> Result<LevelPrize, RepoCreateError> {
        self.ensure_exists(level::Entity::find_by_id(level_id.0))
            .await?;
        self.ensure_exists(prize::Entity::find_by_id(prize_id.0))
            .await?;

        let active_model = level_prize::ActiveModel {
            id: NotSet,
            level_id: Set(level_id.0),
            prize_id: Set(prize_id.0),
            received: Set(None),
        };
        let model = active_model.insert(&self.db).await.map_err(create_error)?;
        Ok(Self::model_to_level_prize(model))
    }

    async fn find_level_prize(&self, level_id: LevelId) -> Result<Option<LevelPrize>, RepoError> {
        let model = level_prize::Entity::find()
            .filter(level_prize::Column::LevelId.eq(level_id.0))
            .order_by_asc(level_prize::Column::Id)
            .one(&self.db)
            .await
            .map_err(repo_error)?;
        Ok(model.map(Self::model_to_level_prize))
    }

    async fn mark_level_prize_received(
        &self,
        level_prize_id: LevelPrizeId,
        at: DateTime<Utc>,
    ) -> Result<bool, RepoUpdateError> {
        // conditional update so that concurrent callers cannot both grant
        let result = level_prize::Entity::update_many()
            .set(level_prize::ActiveModel {
                received: Set(Some(at)),
                ..Default::default()
            })
            .filter(level_prize::Column::Id.eq(level_prize_id.0))
            .filter(level_prize::Column::Received.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| RepoUpdateError::StorageError(e.to_string()))?;
        if result.rows_affected > 0 {
            return Ok(true);
        }

        let exists = level_prize::Entity::find_by_id(level_prize_id.0)
            .one(&self.db)
            .await
            .map_err(|e| RepoUpdateError::StorageError(e.to_string()))?
            .is_some();
        if exists {
            Ok(false)
        } else {
            Err(RepoUpdateError::NotFound)
        }
    }

    async fn create_player_level(
        &self,
        player_level: NewPlayerLevel,
    ) -> Result<PlayerLevel, RepoCreateError> {
        self.ensure_exists(player::Entity::find_by_id(player_level.player_id.0.clone()))
            .await?;
        self.ensure_exists(level::Entity::find_by_id(player_level.level_id.0))
            .await?;

        let active_model = player_level::ActiveModel {
            id: NotSet,
            player_id: Set(player_level.player_id.0),
            level_id: Set(player_level.level_id.0),
            completed: Set(player_level.completed),
            is_completed: Set(player_level.is_completed),
            score: Set(player_level.score),
        };
        let model = active_model.insert(&self.db).await.map_err(create_error)?;
        Ok(Self::model_to_player_level(model))
    }

    async fn get_player_level(
        &self,
        player_level_id: PlayerLevelId,
    ) -> Result<PlayerLevel, RepoRetrieveError> {
        player_level::Entity::find_by_id(player_level_id.0)
            .one(&self.db)
            .await
            .map_err(retrieve_error)?
            .map(Self::model_to_player_level)
            .ok_or(RepoRetrieveError::NotFound)
    }
}
