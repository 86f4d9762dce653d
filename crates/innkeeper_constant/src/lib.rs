//! Shared constants for innkeeper.

pub mod app;
pub mod defaults;
