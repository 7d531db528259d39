//! Data models.

pub mod answer;
pub mod config;
pub mod response;
