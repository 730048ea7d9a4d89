pub mod row;

pub use row::{COLUMNS, LeaderboardRow};
