pub mod boost;
pub mod level;
pub mod level_prize;
pub mod player;
pub mod player_boost;
pub mod player_level;
pub mod prize;
