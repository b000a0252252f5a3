//! Operator tooling for the drone motion simulator.
//!
//! This crate provides the CLI binaries:
//! - play_track: real-time playback of a CSV track or built-in scenario
//! - search_location: forward geocoding for seed waypoints

pub mod geocode;
pub mod player;
pub mod scenarios;
