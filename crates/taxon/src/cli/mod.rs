//! Command handlers.

pub mod classify;
pub mod config;
