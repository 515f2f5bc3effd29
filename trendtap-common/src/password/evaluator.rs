use serde::Serialize;

use super::estimator::{charset_size, StrengthEstimate, StrengthEstimator};
use super::strength::StrengthCategory;
use super::wordlist::is_common_password;
use crate::PasswordRequirements;

/// Account context fed to the estimator so that passwords built from the
/// user's own identity rate poorly.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl EvaluationContext {
    fn word_list(&self) -> Vec<&str> {
        let mut words = vec![];
        if let Some(local_part) = self.email.as_deref().and_then(|e| e.split('@').next()) {
            if !local_part.is_empty() {
                words.push(local_part);
            }
        }
        words.extend(self.first_name.as_deref());
        words.extend(self.last_name.as_deref());
        words
    }
}

/// Outcome of each individual policy check. A `false` anywhere comes with a
/// matching feedback entry in the evaluation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequirementChecks {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    pub special: bool,
    pub special_count: bool,
    pub no_sequential_run: bool,
    pub no_repeated_run: bool,
    pub no_forbidden_pattern: bool,
    pub not_common: bool,
}

impl RequirementChecks {
    pub fn all_met(&self) -> bool {
        self.length
            && self.uppercase
            && self.lowercase
            && self.digit
            && self.special
            && self.special_count
            && self.no_sequential_run
            && self.no_repeated_run
            && self.no_forbidden_pattern
            && self.not_common
    }

    // Length bound failures short-circuit before the other checks run, so
    // none of them can be claimed satisfied.
    fn none_met() -> Self {
        Self {
            length: false,
            uppercase: false,
            lowercase: false,
            digit: false,
            special: false,
            special_count: false,
            no_sequential_run: false,
            no_repeated_run: false,
            no_forbidden_pattern: false,
            not_common: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub strength: StrengthCategory,
    pub score: u8,
    pub feedback: Vec<String>,
    pub suggestions: Vec<String>,
    pub requirements_met: RequirementChecks,
    pub entropy_bits: f64,
    pub crack_time_display: String,
    pub crack_time_seconds: f64,
}

/// Scores `password` against `requirements`. Validity is the conjunction of
/// all requirement checks, the estimator score gate and the entropy gate;
/// the strength band is advisory on top of that.
///
/// Pure function of its inputs. Passing no estimator degrades to a neutral
/// estimate (score 0, "instant"), which weakens the verdict but never
/// errors.
pub fn evaluate_password(
    password: &str,
    requirements: &PasswordRequirements,
    context: Option<&EvaluationContext>,
    estimator: Option<&dyn StrengthEstimator>,
) -> PasswordValidationResult {
    let length = password.chars().count();

    if length < requirements.min_length || length > requirements.max_length {
        let message = if password.is_empty() {
            "Password is required".to_owned()
        } else if length < requirements.min_length {
            format!(
                "Password must be at least {} characters long",
                requirements.min_length
            )
        } else {
            format!(
                "Password must be at most {} characters long",
                requirements.max_length
            )
        };
        return PasswordValidationResult {
            is_valid: false,
            strength: StrengthCategory::VeryWeak,
            score: 0,
            feedback: vec![message],
            suggestions: vec![],
            requirements_met: RequirementChecks::none_met(),
            entropy_bits: 0.0,
            crack_time_display: "instant".to_owned(),
            crack_time_seconds: 0.0,
        };
    }

    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let special_count = password.chars().filter(|c| c.is_ascii_punctuation()).count();

    let lowered = password.to_lowercase();
    let forbidden_hit = requirements
        .forbidden_patterns
        .iter()
        .find(|pattern| !pattern.is_empty() && lowered.contains(&pattern.to_lowercase()));

    let checks = RequirementChecks {
        length: true,
        uppercase: !requirements.require_uppercase || has_uppercase,
        lowercase: !requirements.require_lowercase || has_lowercase,
        digit: !requirements.require_digit || has_digit,
        special: !requirements.require_special || special_count > 0,
        special_count: !requirements.require_special
            || special_count >= requirements.min_special_chars,
        no_sequential_run: longest_sequential_run(password) <= requirements.max_sequential_run,
        no_repeated_run: longest_repeat_run(password) <= requirements.max_repeat_run,
        no_forbidden_pattern: forbidden_hit.is_none(),
        not_common: !is_common_password(password),
    };

    let mut feedback = vec![];
    if !checks.uppercase {
        feedback.push("Password must contain at least one uppercase letter".to_owned());
    }
    if !checks.lowercase {
        feedback.push("Password must contain at least one lowercase letter".to_owned());
    }
    if !checks.digit {
        feedback.push("Password must contain at least one digit".to_owned());
    }
    if !checks.special {
        feedback.push("Password must contain at least one special character".to_owned());
    }
    if checks.special && !checks.special_count {
        feedback.push(format!(
            "Password must contain at least {} special characters",
            requirements.min_special_chars
        ));
    }
    if !checks.no_sequential_run {
        feedback.push(format!(
            "Password must not contain more than {} sequential characters in a row",
            requirements.max_sequential_run
        ));
    }
    if !checks.no_repeated_run {
        feedback.push(format!(
            "Password must not repeat one character more than {} times in a row",
            requirements.max_repeat_run
        ));
    }
    if let Some(pattern) = forbidden_hit {
        feedback.push(format!("Password must not contain \"{pattern}\""));
    }
    if !checks.not_common {
        feedback.push("Password is too common and appears in breach lists".to_owned());
    }

    let entropy_bits = entropy(password);

    let context_words = context.map(|c| c.word_list()).unwrap_or_default();
    let estimate = match estimator {
        Some(estimator) => estimator.estimate(password, &context_words),
        None => StrengthEstimate::unavailable(),
    };

    let score = (f64::from(estimate.score) * 20.0 + (entropy_bits / 10.0).min(10.0) * 10.0)
        .min(100.0)
        .round() as u8;

    let all_met = checks.all_met();
    let meets_score = estimate.score >= requirements.min_strength_score;
    let meets_entropy = entropy_bits >= requirements.min_entropy;

    let mut suggestions = estimate.suggestions;
    if let Some(warning) = estimate.warning {
        feedback.push(warning);
    } else if !meets_score {
        feedback.push("Password is too easy to guess".to_owned());
    }
    if !meets_entropy {
        feedback.push("Password needs more length or character variety".to_owned());
        suggestions.push("Longer passphrases with mixed character types rate higher".to_owned());
    }

    PasswordValidationResult {
        is_valid: all_met && meets_score && meets_entropy,
        strength: StrengthCategory::from_score(score, all_met),
        score,
        feedback,
        suggestions,
        requirements_met: checks,
        entropy_bits,
        crack_time_display: estimate.crack_time_display,
        crack_time_seconds: estimate.crack_time_seconds,
    }
}

/// Length times the square root of the pooled alphabet size. A deliberate
/// heuristic, not Shannon entropy: deterministic and driven by which
/// character classes appear, not by symbol frequencies.
pub fn entropy(password: &str) -> f64 {
    password.chars().count() as f64 * charset_size(password).sqrt()
}

pub(crate) fn longest_sequential_run(password: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<u32> = None;
    for c in password.chars() {
        let code = c as u32;
        run = match previous {
            Some(p) if code == p + 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(code);
    }
    longest
}

pub(crate) fn longest_repeat_run(password: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    let mut previous = None;
    for c in password.chars() {
        run = if previous == Some(c) { run + 1 } else { 1 };
        longest = longest.max(run);
        previous = Some(c);
    }
    longest
}
