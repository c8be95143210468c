// This file defines the library interface of the link-state simulator, exporting the routing engine, the script driver and the report writers.

pub mod types;
pub mod router;
pub mod dijkstra;
pub mod lsa;
pub mod topology;
pub mod script;
pub mod driver;
pub mod report;
pub mod read_config;
pub mod init;
pub mod error;

pub use driver::{Driver, SimulationStats};
pub use error::{AppError, Result};
pub use read_config::SimulationConfig;
pub use report::ReportFormat;
pub use router::Router;
pub use topology::Topology;
