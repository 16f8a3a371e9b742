//! muka - question share links
//!
//! A sender picks a question template and gets a short-lived, single-use
//! share link; the recipient follows it to answer with a song.
//!
//! # Architecture
//! - `storage`: SeaORM backend for questions and links
//! - `services`: question catalog and link issuance/resolution
//! - `api`: HTTP handlers and middleware
//! - `interfaces`: CLI commands
//! - `config`: TOML + env configuration
//! - `runtime`: startup, shutdown and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
