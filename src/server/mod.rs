pub mod app;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod routes;
