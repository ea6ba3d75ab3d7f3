use std::{num::NonZeroU32, str::FromStr, sync::Arc};

use chrono::{DateTime, Utc};
use reward_persistence_sea_orm_entities::{boost, player_boost};
use reward_server_app::domain::{
    PlayerId, RepoCreateError, RepoError, RepoRetrieveError,
    boost::{Boost, BoostRepository, BoostType, PlayerBoost},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::{Expr, ExprTrait, OnConflict},
};

use crate::{create_db_pool, create_error, repo_error, retrieve_error};

pub struct BoostRepositoryImpl {
    db: DatabaseConnection,
    boost_cache: Arc<moka::sync::Cache<String, Boost>>,
}

impl BoostRepositoryImpl {
    pub async fn new() -> Self {
        Self::with_connection(create_db_pool().await)
    }

    pub fn with_connection(db: DatabaseConnection) -> Self {
        let boost_cache = Arc::new(
            moka::sync::Cache::builder()
                .max_capacity(1_000)
                .time_to_live(std::time::Duration::from_secs(60 * 60 * 12))
                .build(),
        );
        Self { db, boost_cache }
    }

    fn model_to_player_boost(model: player_boost::Model) -> PlayerBoost {
        PlayerBoost {
            player_id: PlayerId(model.player_id),
            boost_name: model.boost_name,
            quantity: model.quantity,
            boost_add_time: model.boost_add_time,
        }
    }
}

#[async_trait::async_trait]
impl BoostRepository for BoostRepositoryImpl {
    async fn create_boost(&self, boost: Boost) -> Result<(), RepoCreateError> {
        let active_model = boost::ActiveModel {
            name: Set(boost.name.clone()),
            boost_type: Set(boost.boost_type.as_str().to_string()),
            description: Set(boost.description.clone()),
        };
        active_model.insert(&self.db).await.map_err(create_error)?;
        self.boost_cache.insert(boost.name.clone(), boost);
        Ok(())
    }

    async fn get_boost(&self, name: &str) -> Result<Boost, RepoRetrieveError> {
        if let Some(cached) = self.boost_cache.get(name) {
            return Ok(cached);
        }

        let model = boost::Entity::find_by_id(name.to_string())
            .one(&self.db)
            .await
            .map_err(retrieve_error)?
            .ok_or(RepoRetrieveError::NotFound)?;
        let boost_type = BoostType::from_str(&model.boost_type)
            .map_err(|e| RepoRetrieveError::StorageError(e.to_string()))?;
        let boost = Boost {
            name: model.name,
            boost_type,
            description: model.description,
        };
        self.boost_cache.insert(boost.name.clone(), boost.clone());
        Ok(boost)
    }

    async fn add_player_boost(
        &self,
        player_id: &PlayerId,
        boost_name: &str,
        quantity: NonZeroU32,
        now: DateTime<Utc>,
    ) -> Result<PlayerBoost, RepoError> {
        // single upsert keyed on (player_id, boost_name)
        let active_model = player_boost::ActiveModel {
            player_id: Set(player_id.0.clone()),
            boost_name: Set(boost_name.to_string()),
            quantity: Set(quantity.get()),
            boost_add_time: Set(now),
        };
        let on_conflict = OnConflict::columns([
            player_boost::Column::PlayerId,
            player_boost::Column::BoostName,
        ])
        .value(
            player_boost::Column::Quantity,
            Expr::col(player_boost::Column::Quantity).add(quantity.get()),
        )
        .to_owned();
        player_boost::Entity::insert(active_model)
            .on_conflict(on_conflict)
            .exec_without_returning(&self.db)
            .await
            .map_err(repo_error)?;

        player_boost::Entity::find_by_id((player_id.0.clone(), boost_name.to_string()))
            .one(&self.db)
            .await
            .map_err(repo_error)?
            .map(Self::model_to_player_boost)
            .ok_or_else(|| {
                RepoError::StorageError(format!(
                    "Boost {} of player {} vanished after upsert",
                    boost_name, player_id
                ))
            })
    }

    async fn list_player_boosts(&self, player_id: &PlayerId) -> Result<Vec<PlayerBoost>, RepoError> {
        let models = player_boost::Entity::find()
            .filter(player_boost::Column::PlayerId.eq(player_id.0.clone()))
            .order_by_asc(player_boost::Column::BoostName)
            .all(&self.db)
            .await
            .map_err(repo_error)?;
        Ok(models
            .into_iter()
            .map(Self::model_to_player_boost)
            .collect())
    }
}
