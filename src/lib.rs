//! Shift pay engine.
//!
//! This crate prices worked shifts against a workplace's time-of-day and
//! weekday pricing rules, and estimates the annual income tax and social
//! security due on the resulting professional income.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
