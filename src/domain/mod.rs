//! Domain aggregates exposed by the salon service layer.

pub mod auth;
pub mod hairstylist;
pub mod member;
pub mod types;
