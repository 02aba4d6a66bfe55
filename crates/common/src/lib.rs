pub mod api;
pub mod config;
pub mod expr;
pub mod query;
