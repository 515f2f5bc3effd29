use rand::seq::SliceRandom;
use rand::Rng;

use super::evaluator::{longest_repeat_run, longest_sequential_run};
use super::wordlist::is_common_password;
use crate::helpers::rng::get_crypto_rng;
use crate::TrendTapError;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SPECIAL: &[u8] = br##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

pub const MIN_GENERATED_LENGTH: usize = 8;

/// Structural limit shared with the default policy; regeneration keeps the
/// odds of exhausting the attempts astronomically small.
const MAX_RUN: usize = 3;
const MAX_ATTEMPTS: usize = 16;

/// Produces a password with at least one character from each enabled class,
/// using the ChaCha20 RNG for both selection and the final shuffle.
///
/// Candidates with sequential or repeated runs beyond the default policy
/// limits, or that land on the common-password list, are discarded and
/// regenerated.
pub fn generate_password(length: usize, include_special: bool) -> Result<String, TrendTapError> {
    if length < MIN_GENERATED_LENGTH {
        return Err(TrendTapError::PasswordTooShort {
            requested: length,
            minimum: MIN_GENERATED_LENGTH,
        });
    }

    let mut rng = get_crypto_rng();
    for _ in 0..MAX_ATTEMPTS {
        let candidate = generate_candidate(&mut rng, length, include_special);
        if is_acceptable(&candidate) {
            return Ok(candidate);
        }
    }
    Err(TrendTapError::PasswordGenerationExhausted {
        attempts: MAX_ATTEMPTS,
    })
}

fn generate_candidate<R: Rng>(rng: &mut R, length: usize, include_special: bool) -> String {
    let mut alphabet = vec![];
    alphabet.extend_from_slice(LOWERCASE);
    alphabet.extend_from_slice(UPPERCASE);
    alphabet.extend_from_slice(DIGITS);
    if include_special {
        alphabet.extend_from_slice(SPECIAL);
    }

    // One character per enabled class up front, the rest drawn from the
    // whole alphabet, then shuffled so the class characters are not
    // predictably placed.
    let mut chars = vec![pick(rng, LOWERCASE), pick(rng, UPPERCASE), pick(rng, DIGITS)];
    if include_special {
        chars.push(pick(rng, SPECIAL));
    }
    while chars.len() < length {
        chars.push(pick(rng, &alphabet));
    }
    chars.shuffle(rng);
    chars.into_iter().map(char::from).collect()
}

fn pick<R: Rng>(rng: &mut R, set: &[u8]) -> u8 {
    set[rng.gen_range(0..set.len())]
}

fn is_acceptable(candidate: &str) -> bool {
    longest_sequential_run(candidate) <= MAX_RUN
        && longest_repeat_run(candidate) <= MAX_RUN
        && !is_common_password(candidate)
}

#[cfg(test)]
mod tests {
    use super::super::estimator::GuessCountEstimator;
    use super::super::evaluator::evaluate_password;
    use super::*;
    use crate::PasswordRequirements;

    #[test]
    fn respects_length_and_class_presence() {
        for _ in 0..50 {
            let password = generate_password(16, true).unwrap();
            assert_eq!(password.chars().count(), 16);
            assert!(password.chars().any(|c| c.is_ascii_lowercase()));
            assert!(password.chars().any(|c| c.is_ascii_uppercase()));
            assert!(password.chars().any(|c| c.is_ascii_digit()));
            assert!(password.chars().any(|c| c.is_ascii_punctuation()));
        }
    }

    #[test]
    fn no_special_mode_stays_alphanumeric() {
        for _ in 0..50 {
            let password = generate_password(12, false).unwrap();
            assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(password.chars().any(|c| c.is_ascii_lowercase()));
            assert!(password.chars().any(|c| c.is_ascii_uppercase()));
            assert!(password.chars().any(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn minimum_length_is_enforced() {
        assert!(matches!(
            generate_password(7, true),
            Err(TrendTapError::PasswordTooShort {
                requested: 7,
                minimum: 8
            })
        ));
        assert!(generate_password(8, true).is_ok());
    }

    #[test]
    fn output_passes_the_default_policy() {
        for _ in 0..20 {
            let password = generate_password(16, true).unwrap();
            let result = evaluate_password(
                &password,
                &PasswordRequirements::default(),
                None,
                Some(&GuessCountEstimator),
            );
            assert!(result.is_valid, "{password}: {:?}", result.feedback);
        }
    }

    #[test]
    fn successive_outputs_differ() {
        let first = generate_password(20, true).unwrap();
        let second = generate_password(20, true).unwrap();
        assert_ne!(first, second);
    }
}
