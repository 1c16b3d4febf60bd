// Pulseplan - AI workout and nutrition plans in the terminal
// Library exports

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod generation;
pub mod logging;
pub mod plan;
pub mod providers;
pub mod storage;
