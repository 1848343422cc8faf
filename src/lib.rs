//! Evaluation Compliance Engine
//!
//! This crate computes where each employee stands in their performance
//! evaluation cycle: which evaluation is due, by when, and whether it is
//! pending, alerting, overdue, waiting on an observer, or completed.

#![warn(missing_docs)]

pub mod api;
pub mod compliance;
pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;
