//! tripstats - usage statistics and news for a trip-logging site
//!
//! Completed trips are read from the host application's `counted` relation,
//! their comma-separated material and operator fields are expanded into one
//! token per element, and the tokens are ranked by how often they were
//! travelled. Aircraft type codes are resolved to "manufacturer model" names
//! for air and helicopter trips.

pub mod actions;
pub mod config;
pub mod db;
pub mod logging;
pub mod metrics;
pub mod news;
pub mod news_repo;
pub mod schema;
pub mod split;
pub mod trip_types;
pub mod usage_stats;
pub mod usage_stats_cache;
pub mod usage_stats_repo;
pub mod web;

pub use config::Config;
pub use split::split_on_comma;
pub use trip_types::TripType;
pub use usage_stats::{MaterialUsage, OperatorUsage, display_key};
