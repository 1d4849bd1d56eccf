//! Command-line interface for `gtc-peer`.

pub mod args;
pub mod commands;
