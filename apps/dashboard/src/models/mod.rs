pub mod application;
pub mod candidate;
pub mod job;
pub mod metrics;

pub use application::{ApplicationFeedback, PendingApplication};
pub use candidate::{Candidate, RecordId, Verdict};
pub use job::{Job, JobBoard, JobDraft, ParsedJobDocument};
pub use metrics::{DashboardMetrics, DataSource};
