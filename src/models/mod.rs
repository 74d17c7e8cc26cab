//! Database models shared across the salon repository.

#[cfg(feature = "server")]
pub mod config;
pub mod hairstylist;
pub mod member;
