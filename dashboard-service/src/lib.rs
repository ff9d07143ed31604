pub mod api;
pub mod config;
pub mod engine;
pub mod metrics_server;
pub mod observability;
pub mod store;

pub use engine::{compute_dashboard, DashboardMetrics, MetricsError};
