use chrono::{DateTime, Utc};

use crate::domain::{PlayerId, RepoCreateError, RepoRetrieveError, RepoUpdateError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub player_id: PlayerId,
    pub username: String,
    pub first_login: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub points: u32,
}

impl Player {
    pub fn new(player_id: PlayerId, username: String, now: DateTime<Utc>) -> Self {
        Self {
            player_id,
            username,
            first_login: now,
            last_login: None,
            points: 0,
        }
    }

    /// Applies the consecutive-day login rule.
    ///
    /// Points are only awarded when the previous login happened on the
    /// calendar day (UTC) before `now`. A player without any previous login
    /// only gets `last_login` stamped. Every other case leaves the player
    /// untouched, `last_login` included, so a broken streak never restarts.
    pub fn record_login(&mut self, now: DateTime<Utc>, points: u32) -> LoginOutcome {
        let Some(last_login) = self.last_login else {
            self.last_login = Some(now);
            return LoginOutcome::FirstLogin;
        };

        let yesterday = now.date_naive().pred_opt();
        if yesterday == Some(last_login.date_naive()) {
            self.points = self.points.saturating_add(points);
            self.last_login = Some(now);
            LoginOutcome::StreakContinued { awarded: points }
        } else {
            LoginOutcome::StreakBroken
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    FirstLogin,
    StreakContinued { awarded: u32 },
    StreakBroken,
}

impl LoginOutcome {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, LoginOutcome::StreakBroken)
    }
}

#[async_trait::async_trait]
pub trait PlayerRepository {
    async fn create_player(&self, player: Player) -> Result<(), RepoCreateError>;
    async fn get_player(&self, player_id: &PlayerId) -> Result<Player, RepoRetrieveError>;
    async fn save_player(&self, player: &Player) -> Result<(), RepoUpdateError>;
}
