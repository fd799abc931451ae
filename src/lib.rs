//! Prayer timing and alert engine.
//!
//! Computes the day's prayer times for a coordinate, keeps them in a
//! session-owned cache refreshed on a fixed interval, resolves the next
//! prayer with its countdown, and polls the clock to fire one alert per
//! matched prayer time.

pub mod alerts;
pub mod cli;
pub mod config;
pub mod engine;
pub mod location;
pub mod models;
pub mod prayer_times;
pub mod utils;
