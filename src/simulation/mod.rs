//! Simulation loop, configuration and reporting.

pub mod config;
pub mod engine;
pub mod error;
pub mod report;


pub use config::SimConfig;
pub use engine::Simulation;
pub use error::SimError;
pub use report::RunReport;
