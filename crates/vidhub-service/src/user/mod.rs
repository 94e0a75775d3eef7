//! User registration and self-service profile operations.

pub mod account;
pub mod service;

pub use account::{NewAccount, check_new_account};
pub use service::{RegisterUser, UpdateAccount, UserService};
