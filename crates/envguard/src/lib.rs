//! Compliance aggregation and scoring engine for environmental management
//! systems: regulatory timelines, hazardous-waste storage windows, ESG
//! maturity scoring, and the composite environmental health index.

pub mod compliance;
pub mod config;
pub mod error;
pub mod telemetry;
