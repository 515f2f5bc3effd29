mod estimator;
mod evaluator;
mod generator;
mod strength;
mod wordlist;

pub use estimator::{
    display_crack_time, GuessCountEstimator, StrengthEstimate, StrengthEstimator,
};
pub use evaluator::{
    entropy, evaluate_password, EvaluationContext, PasswordValidationResult, RequirementChecks,
};
pub use generator::{generate_password, MIN_GENERATED_LENGTH};
pub use strength::StrengthCategory;
pub use wordlist::is_common_password;
