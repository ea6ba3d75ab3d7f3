use crate::domain::{PlayerId, PlayerLevelId, RepoError};

pub const PLAYER_LEVEL_REPORT_HEADER: &str = "Player ID,Level Title,Is Completed,Prize";

const NO_PRIZE: &str = "No prize";

/// One player level joined with its level title and the title of the prize
/// configured for that level, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerLevelReportRow {
    pub player_level_id: PlayerLevelId,
    pub player_id: PlayerId,
    pub level_title: String,
    pub is_completed: bool,
    pub prize_title: Option<String>,
}

impl PlayerLevelReportRow {
    /// Values are written as-is; a comma inside a title shifts the columns.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{}\n",
            self.player_id,
            self.level_title,
            if self.is_completed { "Yes" } else { "No" },
            self.prize_title.as_deref().unwrap_or(NO_PRIZE)
        )
    }
}

#[async_trait::async_trait]
pub trait PlayerLevelReportRepository {
    /// Returns at most `limit` rows with an id strictly greater than `after`,
    /// ordered by ascending player level id.
    async fn fetch_player_level_page(
        &self,
        after: Option<PlayerLevelId>,
        limit: usize,
    ) -> Result<Vec<PlayerLevelReportRow>, RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_line() {
        let mut row = PlayerLevelReportRow {
            player_level_id: PlayerLevelId(1),
            player_id: PlayerId::new("p-1"),
            level_title: "Forest".to_string(),
            is_completed: true,
            prize_title: Some("Golden Axe".to_string()),
        };
        assert_eq!(row.to_csv_line(), "p-1,Forest,Yes,Golden Axe\n");

        row.is_completed = false;
        row.prize_title = None;
        assert_eq!(row.to_csv_line(), "p-1,Forest,No,No prize\n");
    }
}
