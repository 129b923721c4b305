//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing and verification.
//! - [`jwt`] -- access tokens and refresh-token hashing.
//! - [`cookie`] -- the browser session cookie carrying the access token.

pub mod cookie;
pub mod jwt;
pub mod password;
