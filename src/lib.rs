pub mod analysis;
pub mod chart_export;
pub mod chart_view;
pub mod charts;
pub mod config;
pub mod dataset;
pub mod diff;
pub mod error;
pub mod http_client;
pub mod logging;
pub mod matches;
pub mod notify;
pub mod outcome;
pub mod pipeline;
pub mod score;
pub mod scrape;
pub mod store;
pub mod team_stats;
