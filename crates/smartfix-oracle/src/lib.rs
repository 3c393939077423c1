//! HTTP transport for the SmartFix diagnosis oracle.
//!
//! Provides [`HttpOracle`], the production implementation of the
//! `smartfix_core::oracle::Oracle` seam, and its configuration.

mod client;
mod config;

pub use client::HttpOracle;
pub use config::OracleConfig;
