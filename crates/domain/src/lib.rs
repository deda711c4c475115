//! Domain layer for the PicPeak admin policy core.
//!
//! This crate contains:
//! - Domain models (Event, ThemeConfig, FeedbackSettings, admin accounts)
//! - Pure policy services (expiration, access, theming, feedback validation)
//! - Lifecycle transitions, optimistic concurrency and auto-save scheduling

pub mod models;
pub mod services;
