//! ScholarHub API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, LLM
//! client) so integration tests and the binary entrypoint can both use them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
