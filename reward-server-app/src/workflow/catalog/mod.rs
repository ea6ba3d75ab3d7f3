pub mod attach_prize;
pub mod create_boost;
pub mod create_level;
pub mod create_prize;
