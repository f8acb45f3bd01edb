//! Shared type definitions
//!
//! This module contains the data types shared by the client, the store and the session.

pub mod quote;

pub use quote::{CurrentQuote, Quote, PLACEHOLDER_TEXT};
