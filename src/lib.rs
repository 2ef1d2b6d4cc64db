pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod resolver;
pub mod routes;
pub mod services;
pub mod session;
pub mod shell;
