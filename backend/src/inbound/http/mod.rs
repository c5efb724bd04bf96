//! HTTP inbound adapter exposing the badge and probe endpoints.

pub mod cache_control;
pub mod error;
pub mod health;
pub mod schemas;
pub mod shields;
pub mod state;

pub use error::ApiResult;
