use std::time::Duration;

use crate::Secret;

pub(crate) const fn _default_true() -> bool {
    true
}

pub(crate) const fn _default_min_length() -> usize {
    8
}

pub(crate) const fn _default_max_length() -> usize {
    128
}

pub(crate) const fn _default_min_special_chars() -> usize {
    1
}

pub(crate) const fn _default_max_sequential_run() -> usize {
    3
}

pub(crate) const fn _default_max_repeat_run() -> usize {
    3
}

pub(crate) const fn _default_min_entropy() -> f64 {
    60.0
}

pub(crate) const fn _default_min_strength_score() -> u8 {
    2
}

#[inline]
pub(crate) fn _default_forbidden_patterns() -> Vec<String> {
    vec!["trendtap".to_owned()]
}

pub(crate) const fn _default_max_failed_attempts() -> u32 {
    5
}

#[inline]
pub(crate) fn _default_failed_attempt_window() -> Duration {
    Duration::from_secs(60 * 15)
}

#[inline]
pub(crate) fn _default_lockout_duration() -> Duration {
    Duration::from_secs(60 * 30)
}

pub(crate) const fn _default_suspicious_ip_threshold() -> u64 {
    10
}

#[inline]
pub(crate) fn _default_suspicious_ip_window() -> Duration {
    Duration::from_secs(60 * 60)
}

pub(crate) const fn _default_suspicious_risk_threshold() -> u8 {
    75
}

#[inline]
pub(crate) fn _default_attempt_retention() -> Duration {
    Duration::from_secs(60 * 60 * 24 * 30)
}

#[inline]
pub(crate) fn _default_database_url() -> Secret<String> {
    Secret::new("sqlite:data/db".to_owned())
}
