pub mod analytics;
pub mod catalog;
pub mod codec;
pub mod generation;
pub mod jobs;
pub mod sessions;
pub mod tenants;
