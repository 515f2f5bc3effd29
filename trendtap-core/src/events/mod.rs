mod log;
mod summary;

pub use log::{EventFilter, NewSecurityEvent, SecurityEventLog, DEFAULT_QUERY_LIMIT};
pub use summary::{security_score, AccountSecuritySummary};
