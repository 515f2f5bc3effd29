pub mod check;
pub mod check_password;
pub mod cleanup;
mod common;
pub mod events;
pub mod generate_password;
pub mod hash;
pub mod lock;
pub mod status;
pub mod unlock;
