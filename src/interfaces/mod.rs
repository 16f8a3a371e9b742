//! User-facing interfaces besides HTTP

pub mod cli;
