mod config;
mod error;
pub mod helpers;
pub mod password;
mod types;

pub use config::*;
pub use error::TrendTapError;
pub use types::*;
