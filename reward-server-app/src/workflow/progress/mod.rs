pub mod assign_prize;
pub mod record_result;
