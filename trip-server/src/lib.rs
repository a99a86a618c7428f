//! Travel planner server.
//!
//! Keeps the user's saved trips, brings their destination photo and weather
//! up to date when a session starts, and proxies the place, photo, and
//! weather lookups the browser client needs.

pub mod cache;
pub mod config;
pub mod domain;
pub mod providers;
pub mod trips;
pub mod web;
