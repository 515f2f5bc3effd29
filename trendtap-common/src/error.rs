use std::error::Error;

use uuid::Uuid;

#[derive(thiserror::Error, Debug)]
pub enum TrendTapError {
    #[error("database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),
    #[error("user {0} not found")]
    UserNotFound(Uuid),
    #[error("lockout {0} not found")]
    LockoutNotFound(Uuid),
    #[error("breach record {0} not found")]
    BreachNotFound(Uuid),
    #[error("invalid or expired unlock token")]
    InvalidUnlockToken,
    #[error("requested password length {requested} is below the minimum of {minimum}")]
    PasswordTooShort { requested: usize, minimum: usize },
    #[error("could not produce an acceptable password in {attempts} attempts")]
    PasswordGenerationExhausted { attempts: usize },
    #[error("deserialization failed: {0}")]
    DeserializeJson(#[from] serde_json::Error),
    #[error("Inconsistent state error")]
    InconsistentState,
    #[error(transparent)]
    Other(Box<dyn Error + Send + Sync>),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl TrendTapError {
    pub fn other<E: Error + Send + Sync + 'static>(err: E) -> Self {
        Self::Other(Box::new(err))
    }
}
