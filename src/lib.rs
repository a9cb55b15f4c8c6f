//! staffdesk - an in-memory employee workstation
//!
//! This crate provides a work-session tracker with presence status, a small
//! colleague chat, a project file browser and an AI assistant, driven from an
//! interactive shell or a live terminal dashboard. All state lives in a
//! [`Portal`] for the lifetime of the process.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod portal;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::StaffdeskError;
pub use portal::Portal;
