//! # auth-adapters
//!
//! Implementations of `domains::AccessTokenVerifier`.

#[cfg(feature = "auth-jwt")]
pub mod jwt;

#[cfg(feature = "auth-jwt")]
pub use jwt::JwtAccessTokenVerifier;
