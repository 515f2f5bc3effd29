pub mod db;
pub mod events;
mod helpers;
pub use helpers::*;
pub mod lockout;
mod services;
pub use services::*;
