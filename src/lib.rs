pub mod config;
pub mod error;
pub mod partition;
pub mod report;
pub mod scan;
