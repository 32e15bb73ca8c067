pub mod common;
pub mod feed;
pub mod leaderboard;
pub mod opportunity;
pub mod post;
pub mod saved;
pub mod score;
pub mod shortlist;
