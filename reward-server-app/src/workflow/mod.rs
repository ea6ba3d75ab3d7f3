pub mod catalog;
pub mod export;
pub mod player;
pub mod progress;
