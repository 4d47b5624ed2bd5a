//! Credit card recommendation service.
//!
//! Raw card records are normalized into canonical [`models::Card`] values and
//! scored against a user's spend, spending category, application history and
//! issuer constraints by the recommendation engine.
//!
//! # Modules
//!
//! - `api`: axum router, handlers and shared state.
//! - `config`: environment-driven configuration.
//! - `error`: application error type and HTTP mapping.
//! - `middleware`: request ID propagation.
//! - `models`: cards, application history, constraints, recommendations.
//! - `services`: normalizer, recommendation engine, card catalog sources.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
