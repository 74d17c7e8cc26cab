//! Page view models: plain state machines driven by the handlers and rendered
//! by the templates.

pub mod member_page;
pub mod member_table;
pub mod navigation;
pub mod signal;
pub mod stat;
