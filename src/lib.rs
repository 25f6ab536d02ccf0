pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod model;
pub mod pricing;
pub mod routing;
pub mod server;
