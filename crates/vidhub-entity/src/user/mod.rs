//! User domain entities.

pub mod model;
pub mod password;

pub use model::{CreateUser, PublicUser, UpdateUser, User};
pub use password::PasswordHash;
