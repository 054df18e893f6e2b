//! Decision Engine - multi-factor decision recommendations
//!
//! Combines lexical sentiment, clock-derived temporal factors, recurring
//! question patterns and a per-session preference profile into a single
//! recommendation with a confidence score, reasoning and follow-ups.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
