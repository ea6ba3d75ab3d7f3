use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    LevelId, LevelPrizeId, PlayerId, PlayerLevelId, PrizeId, RepoCreateError, RepoError,
    RepoRetrieveError, RepoUpdateError,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub id: LevelId,
    pub title: String,
    pub order: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prize {
    pub id: PrizeId,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerLevel {
    pub id: PlayerLevelId,
    pub player_id: PlayerId,
    pub level_id: LevelId,
    pub completed: NaiveDate,
    pub is_completed: bool,
    pub score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPlayerLevel {
    pub player_id: PlayerId,
    pub level_id: LevelId,
    pub completed: NaiveDate,
    pub is_completed: bool,
    pub score: u32,
}

/// Prize configured for a level. `received` stays `None` until the prize
/// has been handed out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelPrize {
    pub id: LevelPrizeId,
    pub level_id: LevelId,
    pub prize_id: PrizeId,
    pub received: Option<DateTime<Utc>>,
}

impl LevelPrize {
    pub fn is_received(&self) -> bool {
        self.received.is_some()
    }
}

#[async_trait::async_trait]
pub trait LevelRepository {
    async fn create_level(&self, title: String, order: i32) -> Result<Level, RepoError>;
    async fn get_level(&self, level_id: LevelId) -> Result<Level, RepoRetrieveError>;
    async fn create_prize(&self, title: String) -> Result<Prize, RepoError>;
    async fn get_prize(&self, prize_id: PrizeId) -> Result<Prize, RepoRetrieveError>;
    async fn create_level_prize(
        &self,
        level_id: LevelId,
        prize_id: PrizeId,
    ) -> Result<LevelPrize, RepoCreateError>;
    /// First prize configured for the level, lowest id wins.
    async fn find_level_prize(&self, level_id: LevelId) -> Result<Option<LevelPrize>, RepoError>;
    /// Sets `received` only if it is still unset. Returns whether this call
    /// performed the transition.
    async fn mark_level_prize_received(
        &self,
        level_prize_id: LevelPrizeId,
        at: DateTime<Utc>,
    ) -> Result<bool, RepoUpdateError>;
    async fn create_player_level(
        &self,
        player_level: NewPlayerLevel,
    ) -> Result<PlayerLevel, RepoCreateError>;
    async fn get_player_level(
        &self,
        player_level_id: PlayerLevelId,
    ) -> Result<PlayerLevel, RepoRetrieveError>;
}
