pub mod athletes;
pub mod feed;
pub mod leaderboard;
pub mod opportunities;
pub mod posts;
pub mod saved;
pub mod scores;
pub mod shortlist;
