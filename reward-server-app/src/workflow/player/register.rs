use std::sync::Arc;

use validator::Validate;

use crate::{
    domain::{
        PlayerId, RepoCreateError,
        player::{Player, PlayerRepository},
    },
    ports::clock::Clock,
};

#[async_trait::async_trait]
pub trait RegisterPlayerUseCase {
    async fn register_player(
        &self,
        player_id: &str,
        username: &str,
    ) -> Result<Player, RegisterPlayerError>;
}

#[derive(Debug)]
pub enum RegisterPlayerError {
    InvalidInput(String),
    AlreadyExists,
    RepositoryError,
}

#[derive(Validate)]
struct RegistrationForm {
    #[validate(length(min = 1, max = 100))]
    player_id: String,
    #[validate(length(min = 1, max = 255))]
    username: String,
}

pub struct RegisterPlayerUseCaseImpl<P: PlayerRepository, C: Clock> {
    player_repository: Arc<P>,
    clock: Arc<C>,
}

impl<P: PlayerRepository, C: Clock> RegisterPlayerUseCaseImpl<P, C> {
    pub fn new(player_repository: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            player_repository,
            clock,
        }
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static, C: Clock + Send + Sync + 'static>
    RegisterPlayerUseCase for RegisterPlayerUseCaseImpl<P, C>
{
    async fn register_player(
        &self,
        player_id: &str,
        username: &str,
    ) -> Result<Player, RegisterPlayerError> {
        let form = RegistrationForm {
            player_id: player_id.trim().to_string(),
            username: username.trim().to_string(),
        };
        if let Err(e) = form.validate() {
            return Err(RegisterPlayerError::InvalidInput(e.to_string()));
        }

        let player = Player::new(PlayerId(form.player_id), form.username, self.clock.now());
        match self.player_repository.create_player(player.clone()).await {
            Ok(()) => {
                log::info!("Registered player {}", player.player_id);
                Ok(player)
            }
            Err(RepoCreateError::Conflict) => Err(RegisterPlayerError::AlreadyExists),
            Err(e) => {
                log::error!("Failed to register player {}: {}", player.player_id, e);
                Err(RegisterPlayerError::RepositoryError)
            }
        }
    }
}
