//! Shared utilities and boundary helpers for the PicPeak admin policy core.
//!
//! This crate provides functionality used by the other crates:
//! - Normalization of loosely typed backend flags
//! - Lenient timestamp parsing
//! - Common field validation logic
//! - Hashing and token generation

pub mod crypto;
pub mod loose;
pub mod time;
pub mod validation;

pub use loose::LooseFlag;
pub use time::{parse_timestamp, parse_timestamp_lenient, DateParseError};
