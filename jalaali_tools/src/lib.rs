//! Command line front end for `jalaali_calendar`.
//!
//! Entry commands behave like a form submit: invalid input is reported with
//! a localized message and nothing is produced. Display commands always print
//! something, falling back to the raw value.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
