//! Quotebook Library
//!
//! Fetches random quotes, keeps favorites on disk and drives the terminal and desktop front ends.

#[cfg(feature = "desktop")]
pub mod app;
pub mod client;
pub mod session;
pub mod storage;
pub mod types;
pub mod ui;
