mod defaults;

use std::path::PathBuf;
use std::time::Duration;

use defaults::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Secret;

/// Account password policy. Every knob here feeds the evaluator; the
/// generator only honors the structural ones (runs and the common list).
#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct PasswordRequirements {
    #[serde(default = "_default_min_length")]
    pub min_length: usize,

    #[serde(default = "_default_max_length")]
    pub max_length: usize,

    #[serde(default = "_default_true")]
    pub require_uppercase: bool,

    #[serde(default = "_default_true")]
    pub require_lowercase: bool,

    #[serde(default = "_default_true")]
    pub require_digit: bool,

    #[serde(default = "_default_true")]
    pub require_special: bool,

    #[serde(default = "_default_min_special_chars")]
    pub min_special_chars: usize,

    /// Longest allowed run of consecutive codepoints ("abcd", "1234").
    #[serde(default = "_default_max_sequential_run")]
    pub max_sequential_run: usize,

    /// Longest allowed run of one repeated character ("aaaa").
    #[serde(default = "_default_max_repeat_run")]
    pub max_repeat_run: usize,

    /// Substrings that must not appear anywhere in a password,
    /// compared case-insensitively.
    #[serde(default = "_default_forbidden_patterns")]
    pub forbidden_patterns: Vec<String>,

    #[serde(default = "_default_min_entropy")]
    pub min_entropy: f64,

    /// Minimum estimator score (0..=4) for a password to be accepted.
    #[serde(default = "_default_min_strength_score")]
    pub min_strength_score: u8,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: _default_min_length(),
            max_length: _default_max_length(),
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
            min_special_chars: _default_min_special_chars(),
            max_sequential_run: _default_max_sequential_run(),
            max_repeat_run: _default_max_repeat_run(),
            forbidden_patterns: _default_forbidden_patterns(),
            min_entropy: _default_min_entropy(),
            min_strength_score: _default_min_strength_score(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct LockoutConfig {
    /// Failed logins within `failed_attempt_window` that trigger a lockout.
    #[serde(default = "_default_max_failed_attempts")]
    pub max_failed_attempts: u32,

    #[serde(default = "_default_failed_attempt_window", with = "humantime_serde")]
    #[schemars(with = "String")]
    pub failed_attempt_window: Duration,

    /// Length of an automatic (non-permanent) lockout.
    #[serde(default = "_default_lockout_duration", with = "humantime_serde")]
    #[schemars(with = "String")]
    pub lockout_duration: Duration,

    /// Prior failures from one source IP within `suspicious_ip_window`
    /// beyond which further failures are flagged as suspicious.
    #[serde(default = "_default_suspicious_ip_threshold")]
    pub suspicious_ip_threshold: u64,

    #[serde(default = "_default_suspicious_ip_window", with = "humantime_serde")]
    #[schemars(with = "String")]
    pub suspicious_ip_window: Duration,

    /// Risk score (0..=100) at which a reported suspicious activity
    /// locks the account on the spot.
    #[serde(default = "_default_suspicious_risk_threshold")]
    pub suspicious_risk_threshold: u8,

    /// How long failed attempt rows are kept before cleanup deletes them.
    #[serde(default = "_default_attempt_retention", with = "humantime_serde")]
    #[schemars(with = "String")]
    pub attempt_retention: Duration,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: _default_max_failed_attempts(),
            failed_attempt_window: _default_failed_attempt_window(),
            lockout_duration: _default_lockout_duration(),
            suspicious_ip_threshold: _default_suspicious_ip_threshold(),
            suspicious_ip_window: _default_suspicious_ip_window(),
            suspicious_risk_threshold: _default_suspicious_risk_threshold(),
            attempt_retention: _default_attempt_retention(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema)]
pub struct TrendTapConfigStore {
    #[serde(default = "_default_database_url")]
    #[schemars(with = "String")]
    pub database_url: Secret<String>,

    #[serde(default)]
    pub password_requirements: PasswordRequirements,

    #[serde(default)]
    pub lockout: LockoutConfig,
}

impl Default for TrendTapConfigStore {
    fn default() -> Self {
        Self {
            database_url: _default_database_url(),
            password_requirements: <_>::default(),
            lockout: <_>::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrendTapConfig {
    pub store: TrendTapConfigStore,
    pub paths_relative_to: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deserialize_from_empty_document() {
        let store: TrendTapConfigStore = serde_json::from_str("{}").unwrap();
        assert_eq!(store.password_requirements.min_length, 8);
        assert_eq!(store.lockout.max_failed_attempts, 5);
        assert_eq!(
            store.lockout.lockout_duration,
            Duration::from_secs(60 * 30)
        );
        assert_eq!(store.database_url.expose_secret(), "sqlite:data/db");
    }

    #[test]
    fn humantime_durations_parse() {
        let store: TrendTapConfigStore = serde_json::from_str(
            r#"{"lockout": {"failed_attempt_window": "5m", "attempt_retention": "90d"}}"#,
        )
        .unwrap();
        assert_eq!(
            store.lockout.failed_attempt_window,
            Duration::from_secs(300)
        );
        assert_eq!(
            store.lockout.attempt_retention,
            Duration::from_secs(60 * 60 * 24 * 90)
        );
    }
}
