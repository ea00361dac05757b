/// Shared modules for the stock dashboards
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod time_range;
pub mod widget;
