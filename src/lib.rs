pub mod client;
pub mod config;
pub mod controllers;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod sanitize;
pub mod server;
pub mod state;
pub mod store;
pub mod tui;
