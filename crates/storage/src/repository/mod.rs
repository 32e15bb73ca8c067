pub mod feed;
pub mod opportunity;
pub mod post;
pub mod saved;
pub mod score;
pub mod user;
