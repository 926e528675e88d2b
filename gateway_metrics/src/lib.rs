pub mod exporters;
pub mod summary;
pub mod telemetry;

pub use summary::{FleetTotals, SummaryReport};
pub use telemetry::install_prometheus;
