pub mod context;
pub mod dashboard;
pub mod quotes;
pub mod routes;
