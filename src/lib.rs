pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod hierarchy;
pub mod middleware;
pub mod store;
