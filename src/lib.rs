//! `freight-eta` library crate.
//!
//! The binary (`eta`) is a thin wrapper around this library so that:
//!
//! - the estimator is testable without spawning processes
//! - a quoting service can embed `eta::EtaPredictor` with its own weather feed
//! - command dispatch stays separate from the arithmetic

pub mod app;
pub mod batch;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod eta;
pub mod geo;
pub mod io;
pub mod report;
pub mod tracking;
