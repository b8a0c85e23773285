//! Daily checklist for a fixed 90-day program. The program start is recorded once, after that
//! every moment maps to a day of the program and every day has a fixed list of tasks to tick off.
//! Progress is kept in a small local store and can be exported as JSON, either by hand or by the
//! daemon every evening.
//!

pub mod cli;
pub mod config;
pub mod daemon;
pub mod error;
pub mod export;
pub mod schedule;
pub mod storage;
pub mod tracker;
pub mod utils;
