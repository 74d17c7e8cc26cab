#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
mod server;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod views;

/// Role every user of the dashboard must carry.
pub const SERVICE_ACCESS_ROLE: &str = "salon";
/// Role granting the global member table and hairstylist administration.
pub const SERVICE_ADMIN_ROLE: &str = "salon_admin";
/// Role of hairstylists managing their own members.
pub const SERVICE_HAIRSTYLIST_ROLE: &str = "salon_hairstylist";

#[cfg(feature = "server")]
pub use server::run;
