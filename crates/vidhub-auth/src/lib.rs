//! # vidhub-auth
//!
//! Session token management for VidHub.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token signing and verification
//! - `password`: Argon2id password hashing and policy enforcement
//! - `session`: the session token manager (login, rotation, revocation,
//!   request authorization, password change)

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{AccessClaims, RefreshClaims, TokenPair, TokenSigner, TokenType, TokenVerifier};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{AuthSession, SessionTokenManager};
