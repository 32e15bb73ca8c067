pub mod metric;
pub mod opportunity;
pub mod post;
pub mod score;
pub mod session;
pub mod user;

pub use metric::{MetricValue, RawMetrics};
pub use opportunity::Opportunity;
pub use post::{AuthoredPost, PerformancePost};
pub use score::{ScoreRecord, Severity, Tier};
pub use session::Session;
pub use user::{Profile, RankedAthlete, Role, ScoreSnapshot, Sport};
