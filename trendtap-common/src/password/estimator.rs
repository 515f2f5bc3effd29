use super::wordlist::is_common_password;

/// What an external strength scorer reports for one candidate password.
/// Shaped after the zxcvbn result: a 0..=4 score plus human-oriented
/// crack-time figures.
#[derive(Debug, Clone)]
pub struct StrengthEstimate {
    pub score: u8,
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
    pub crack_time_seconds: f64,
    pub crack_time_display: String,
}

impl StrengthEstimate {
    /// Used when no estimator is wired in. Score 0 and "instant" lean the
    /// result toward weak rather than toward valid.
    pub fn unavailable() -> Self {
        Self {
            score: 0,
            warning: None,
            suggestions: vec![],
            crack_time_seconds: 0.0,
            crack_time_display: "instant".to_owned(),
        }
    }
}

/// Pluggable scorer seam. `user_inputs` carries account context (email local
/// part, names) that a good estimator penalizes.
pub trait StrengthEstimator: Send + Sync {
    fn estimate(&self, password: &str, user_inputs: &[&str]) -> StrengthEstimate;
}

/// Built-in estimator: rates a password by the size of the brute-force
/// search space, with the common-password list and user context as
/// knock-down rules. Assumes an offline attack against a slow hash at
/// 10^4 guesses per second.
pub struct GuessCountEstimator;

const GUESSES_PER_SECOND_LOG10: f64 = 4.0;

impl StrengthEstimator for GuessCountEstimator {
    fn estimate(&self, password: &str, user_inputs: &[&str]) -> StrengthEstimate {
        if is_common_password(password) {
            return StrengthEstimate {
                score: 0,
                warning: Some("This is a commonly used password".to_owned()),
                suggestions: vec!["Pick something that is not on breached-password lists".to_owned()],
                crack_time_seconds: 0.0,
                crack_time_display: "instant".to_owned(),
            };
        }

        let length = password.chars().count() as f64;
        let log10_guesses = length * charset_size(password).log10();

        let mut score = match log10_guesses {
            x if x < 3.0 => 0,
            x if x < 6.0 => 1,
            x if x < 8.0 => 2,
            x if x < 10.0 => 3,
            _ => 4,
        };

        let lowered = password.to_lowercase();
        let mut warning = None;
        if user_inputs
            .iter()
            .any(|word| word.len() >= 3 && lowered.contains(&word.to_lowercase()))
        {
            score = score.min(1);
            warning = Some("Avoid words tied to your account, like your name or email".to_owned());
        }

        let mut suggestions = vec![];
        if score <= 2 {
            suggestions.push("Use a longer password".to_owned());
            suggestions.push("Mix in digits and symbols alongside letters".to_owned());
        }

        let crack_time_seconds = 10f64.powf(log10_guesses - GUESSES_PER_SECOND_LOG10);
        StrengthEstimate {
            score,
            warning,
            suggestions,
            crack_time_display: display_crack_time(crack_time_seconds),
            crack_time_seconds,
        }
    }
}

/// Pooled alphabet size: 26 + 26 + 10 + 32 for each character class that
/// actually appears.
pub(crate) fn charset_size(password: &str) -> f64 {
    let mut size: f64 = 0.0;
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        size += 26.0;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        size += 26.0;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        size += 10.0;
    }
    if password.chars().any(|c| c.is_ascii_punctuation()) {
        size += 32.0;
    }
    size.max(1.0)
}

const MINUTE: f64 = 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const MONTH: f64 = DAY * 31.0;
const YEAR: f64 = MONTH * 12.0;
const CENTURY: f64 = YEAR * 100.0;

pub fn display_crack_time(seconds: f64) -> String {
    if seconds < 1.0 {
        "instant".to_owned()
    } else if seconds < MINUTE {
        quantity(seconds, 1.0, "second")
    } else if seconds < HOUR {
        quantity(seconds, MINUTE, "minute")
    } else if seconds < DAY {
        quantity(seconds, HOUR, "hour")
    } else if seconds < MONTH {
        quantity(seconds, DAY, "day")
    } else if seconds < YEAR {
        quantity(seconds, MONTH, "month")
    } else if seconds < CENTURY {
        quantity(seconds, YEAR, "year")
    } else {
        "centuries".to_owned()
    }
}

fn quantity(seconds: f64, unit_seconds: f64, unit: &str) -> String {
    let n = (seconds / unit_seconds) as u64;
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_scales_with_search_space() {
        let estimator = GuessCountEstimator;
        assert_eq!(estimator.estimate("ab", &[]).score, 0);
        assert_eq!(estimator.estimate("abcd", &[]).score, 1);
        assert_eq!(estimator.estimate("abcde", &[]).score, 2);
        assert_eq!(estimator.estimate("worldtour", &[]).score, 4);
        assert_eq!(estimator.estimate("x9K#m2Qz!pL5vR8w", &[]).score, 4);
    }

    #[test]
    fn common_passwords_score_zero() {
        let estimate = GuessCountEstimator.estimate("password", &[]);
        assert_eq!(estimate.score, 0);
        assert!(estimate.warning.is_some());
        assert_eq!(estimate.crack_time_display, "instant");
    }

    #[test]
    fn user_context_caps_the_score() {
        let estimate = GuessCountEstimator.estimate("Christopher#2024", &["christopher"]);
        assert!(estimate.score <= 1);
        assert!(estimate.warning.is_some());

        let clean = GuessCountEstimator.estimate("Christopher#2024", &[]);
        assert_eq!(clean.score, 4);
    }

    #[test]
    fn short_context_words_are_ignored() {
        let estimate = GuessCountEstimator.estimate("notable#Phrase7", &["no"]);
        assert!(estimate.warning.is_none());
    }

    #[test]
    fn crack_time_display_bands() {
        assert_eq!(display_crack_time(0.2), "instant");
        assert_eq!(display_crack_time(45.0), "45 seconds");
        assert_eq!(display_crack_time(60.0), "1 minute");
        assert_eq!(display_crack_time(HOUR * 5.0), "5 hours");
        assert_eq!(display_crack_time(DAY * 3.0), "3 days");
        assert_eq!(display_crack_time(f64::INFINITY), "centuries");
    }

    #[test]
    fn unavailable_is_fail_open_toward_weak() {
        let estimate = StrengthEstimate::unavailable();
        assert_eq!(estimate.score, 0);
        assert_eq!(estimate.crack_time_display, "instant");
        assert!(estimate.suggestions.is_empty());
    }
}
