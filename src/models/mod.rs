pub mod report;
pub mod queue;
pub mod cache;
pub mod notification;
pub mod admin;
pub mod region;

pub use report::{Report, ReportStatus, NewReport, CreatedReport, ReportFilters, Category};
pub use queue::{QueuedAction, ActionQueueRecord, DrainReport};
pub use cache::{CachedSnapshot, CacheStats};
pub use notification::Notification;
pub use admin::{Admin, AdminLogin, AdminSession};
pub use region::{City, Province};
