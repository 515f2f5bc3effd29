#![allow(non_snake_case)]

pub mod AccountLockout;
pub mod FailedLoginAttempt;
pub mod SecurityEvent;
pub mod SuspiciousActivity;
