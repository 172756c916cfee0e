//! HTTP handlers

pub mod health;
pub mod issues;
pub mod analytics;
