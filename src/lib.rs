//! Controller for the ML test-framework dashboard: data generation, anomaly
//! detection and test prioritization triggered against a remote backend and
//! rendered into an injectable page model.

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod page;
pub mod render;
