pub mod feed;
pub mod ingestion;
pub mod leaderboard;
pub mod narrative;
pub mod recompute;
pub mod saved;
pub mod scoring;
pub mod shortlist;
pub mod tier;
