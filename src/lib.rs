#![doc(hidden)]

//! Core library for npm-health
//!
//! This library powers the `npm-health` tool, which gathers registry, download and
//! source-hosting facts about an npm package and condenses them into a handful of
//! categorical health ratings.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`config`]: Endpoint and client settings
//! - [`facts`]: Data collection and aggregation
//! - [`ratings`]: Rule-based rating of the collected facts
//! - [`reports`]: Human-readable rendering of health reports

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod config;
pub mod facts;
pub mod ratings;
pub mod reports;

pub use crate::commands::{Host, run};
