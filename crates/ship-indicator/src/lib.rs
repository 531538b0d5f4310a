//! Free-shipping indicator: store configuration, eligibility engine, and the adapters that
//! render its output for the server-side cart block and the checkout widget.

pub mod config;
pub mod error;
pub mod indicator;
pub mod telemetry;
