//! In-memory product catalog service.
//!
//! A small HTTP/JSON API exposing create, read, replace, update and delete
//! over a single collection of product records held in process memory.

// Core subsystems
pub mod catalog;
pub mod config;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use catalog::ProductStore;
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
