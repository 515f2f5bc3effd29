mod ledger;

pub use ledger::{
    CleanupStats, FailedLogin, FailedLoginOutcome, LockRequest, LockoutLedger,
    SuspiciousActivityReport,
};
