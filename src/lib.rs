//! Divvy - personal portfolio tracker with a dividend calendar
//!
//! This library provides functionality for searching equities, registering
//! holdings into durable local storage, and projecting the dividend payouts
//! those holdings will produce over the next twelve months.

pub mod cli;
pub mod config;
pub mod dividends;
pub mod error;
pub mod quotes;
pub mod store;
pub mod utils;
