//! TryOn.fit virtual try-on backend
//!
//! Accepts a person photo and a clothing photo, runs them through an image
//! generation provider and records each request as a try-on job. Also serves
//! a per-tenant product catalog, tenant configuration, SDK sessions and usage
//! analytics.

pub mod app_state;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
