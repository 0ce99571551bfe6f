//! Worker-side half of the dashboard: command queue in, fetch results out.

pub mod commands;
pub mod runtime;
