use std::sync::Arc;

use crate::{
    domain::{
        PlayerId, RepoRetrieveError, RepoUpdateError,
        player::{LoginOutcome, Player, PlayerRepository},
    },
    ports::clock::Clock,
};

#[async_trait::async_trait]
pub trait RecordLoginUseCase {
    async fn record_login(
        &self,
        player_id: &PlayerId,
        points: u32,
    ) -> Result<LoginRecord, RecordLoginError>;
}

#[derive(Clone, Debug)]
pub struct LoginRecord {
    pub player: Player,
    pub outcome: LoginOutcome,
}

#[derive(Debug)]
pub enum RecordLoginError {
    PlayerNotFound,
    RepositoryError,
}

pub struct RecordLoginUseCaseImpl<P: PlayerRepository, C: Clock> {
    player_repository: Arc<P>,
    clock: Arc<C>,
}

impl<P: PlayerRepository, C: Clock> RecordLoginUseCaseImpl<P, C> {
    pub fn new(player_repository: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            player_repository,
            clock,
        }
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static, C: Clock + Send + Sync + 'static>
    RecordLoginUseCase for RecordLoginUseCaseImpl<P, C>
{
    async fn record_login(
        &self,
        player_id: &PlayerId,
        points: u32,
    ) -> Result<LoginRecord, RecordLoginError> {
        let mut player = match self.player_repository.get_player(player_id).await {
            Ok(player) => player,
            Err(RepoRetrieveError::NotFound) => return Err(RecordLoginError::PlayerNotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to load player {} for login: {}", player_id, e);
                return Err(RecordLoginError::RepositoryError);
            }
        };

        let outcome = player.record_login(self.clock.now(), points);
        if !outcome.is_mutation() {
            log::debug!("Login streak of player {} is broken, nothing recorded", player_id);
            return Ok(LoginRecord { player, outcome });
        }

        match self.player_repository.save_player(&player).await {
            Ok(()) => {}
            Err(RepoUpdateError::NotFound) => return Err(RecordLoginError::PlayerNotFound),
            Err(RepoUpdateError::StorageError(e)) => {
                log::error!("Failed to save login of player {}: {}", player_id, e);
                return Err(RecordLoginError::RepositoryError);
            }
        }

        if let LoginOutcome::StreakContinued { awarded } = outcome {
            log::info!(
                "Player {} continued login streak, awarded {} points ({} total)",
                player_id,
                awarded,
                player.points
            );
        }
        Ok(LoginRecord { player, outcome })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use crate::testing::{MockClock, MockStore};

    use super::*;

    async fn setup() -> (Arc<MockStore>, Arc<MockClock>, RecordLoginUseCaseImpl<MockStore, MockClock>)
    {
        let store = Arc::new(MockStore::default());
        let clock = Arc::new(MockClock::at(2024, 6, 1, 10));
        store
            .create_player(Player::new(
                PlayerId::new("p1"),
                "alice".to_string(),
                clock.now(),
            ))
            .await
            .unwrap();
        let use_case = RecordLoginUseCaseImpl::new(store.clone(), clock.clone());
        (store, clock, use_case)
    }

    #[tokio::test]
    async fn test_login_streak() {
        let (store, clock, use_case) = setup().await;
        let id = PlayerId::new("p1");

        let first = use_case.record_login(&id, 25).await.unwrap();
        assert_eq!(first.outcome, LoginOutcome::FirstLogin);
        assert_eq!(first.player.points, 0);
        assert_eq!(first.player.last_login, Some(clock.now()));

        clock.advance(Duration::days(1));
        let second = use_case.record_login(&id, 25).await.unwrap();
        assert_eq!(second.outcome, LoginOutcome::StreakContinued { awarded: 25 });

        let stored = store.get_player(&id).await.unwrap();
        assert_eq!(stored.points, 25);
        assert_eq!(stored.last_login, Some(clock.now()));
    }

    #[tokio::test]
    async fn test_broken_streak_does_not_persist() {
        let (store, clock, use_case) = setup().await;
        let id = PlayerId::new("p1");
        use_case.record_login(&id, 10).await.unwrap();
        let before = store.get_player(&id).await.unwrap();

        clock.advance(Duration::hours(3));
        let same_day = use_case.record_login(&id, 10).await.unwrap();
        assert_eq!(same_day.outcome, LoginOutcome::StreakBroken);

        clock.advance(Duration::days(3));
        let after_gap = use_case.record_login(&id, 10).await.unwrap();
        assert_eq!(after_gap.outcome, LoginOutcome::StreakBroken);

        assert_eq!(store.get_player(&id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_unknown_player() {
        let (_store, _clock, use_case) = setup().await;
        assert!(matches!(
            use_case.record_login(&PlayerId::new("nobody"), 5).await,
            Err(RecordLoginError::PlayerNotFound)
        ));
    }
}
