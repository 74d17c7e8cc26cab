//! Data carried from the services to templates and API responses.

pub mod api;
pub mod hairstylists;
pub mod main;
pub mod members;
