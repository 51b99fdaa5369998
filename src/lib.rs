//! container-api-types - typed input validators for a container management API

pub mod cli;
pub mod config;
pub mod types;
