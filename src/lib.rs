//! Random number and random word generators for the terminal.
//!
//! Each generator pairs a value with a bit of enrichment fetched from a
//! public API: trivia for numbers, a definition for words. The displayed
//! value can be copied to the clipboard.
//!
//! * [`options`]: validated ranges and word lengths
//! * [`pipeline`]: generate → enrich, latest request wins
//! * [`api`]: trivia, random word and dictionary clients
//! * [`session`]: the interactive command loop
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

#[macro_use]
extern crate log;

pub mod api;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod features;
pub mod http;
pub mod options;
pub mod pipeline;
pub mod rand;
pub mod render;
pub mod session;
pub mod signal;
