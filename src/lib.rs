//! Gas-adjusted ranking of ETH yield pools, persisted as a point-in-time
//! snapshot document.

pub mod config;
pub mod models;
pub mod services;
pub mod sources;
