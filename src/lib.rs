pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod middleware;
pub mod models;
pub mod render;
pub mod services;
pub mod session;
