pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod comments;
pub mod config;
pub mod database;
pub mod domain;
pub mod replies;
pub mod telemetry;
pub mod threads;
pub mod users;
pub mod utils;
