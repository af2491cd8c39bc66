pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod repositories;
pub mod routes;
pub mod server;
pub mod services;
