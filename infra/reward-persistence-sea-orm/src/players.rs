use reward_persistence_sea_orm_entities::player;
use reward_server_app::domain::{
    PlayerId, RepoCreateError, RepoRetrieveError, RepoUpdateError,
    player::{Player, PlayerRepository},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set, Unchanged};

use crate::{create_db_pool, create_error, retrieve_error, update_error};

pub struct PlayerRepositoryImpl {
    db: DatabaseConnection,
}

impl PlayerRepositoryImpl {
    pub async fn new() -> Self {
        Self::with_connection(create_db_pool().await)
    }

    pub fn with_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_player(model: player::Model) -> Player {
        Player {
            player_id: PlayerId(model.player_id),
            username: model.username,
            first_login: model.first_login,
            last_login: model.last_login,
            points: model.points,
        }
    }
}

#[async_trait::async_trait]
impl PlayerRepository for PlayerRepositoryImpl {
    async fn create_player(&self, player: Player) -> Result<(), RepoCreateError> {
        let active_model = player::ActiveModel {
            player_id: Set(player.player_id.0),
            username: Set(player.username),
            first_login: Set(player.first_login),
            last_login: Set(player.last_login),
            points: Set(player.points),
        };
        active_model.insert(&self.db).await.map_err(create_error)?;
        Ok(())
    }

    async fn get_player(&self, player_id: &PlayerId) -> Result<Player, RepoRetrieveError> {
        player::Entity::find_by_id(player_id.0.clone())
            .one(&self.db)
            .await
            .map_err(retrieve_error)?
            .map(Self::model_to_player)
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn save_player(&self, player: &Player) -> Result<(), RepoUpdateError> {
        // identity and first login never change after creation
        let active_model = player::ActiveModel {
            player_id: Unchanged(player.player_id.0.clone()),
            username: NotSet,
            first_login: NotSet,
            last_login: Set(player.last_login),
            points: Set(player.points),
        };
        active_model.update(&self.db).await.map_err(update_error)?;
        Ok(())
    }
}
