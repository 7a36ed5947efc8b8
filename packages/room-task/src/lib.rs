//! Room automation task for the Hydra collaboration service.
//!
//! Locates a room by title (creating it when absent), optionally adds a
//! member, optionally posts a text message or file reference, then reports
//! a changed/failed verdict as a single JSON object on stdout.

pub mod config;
pub mod report;
pub mod runner;
