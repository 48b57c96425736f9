pub mod cheap_score;
pub mod dual_score;
pub mod health;
pub mod iteration;
pub mod judge_score;

pub use cheap_score::{CheapScore, ScoreReason};
pub use dual_score::DualScore;
pub use health::{ComponentHealth, HealthReport, HealthStatus};
pub use iteration::{IterationMetrics, SkippedItem};
pub use judge_score::JudgeScore;
