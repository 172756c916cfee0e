//! Data models

pub mod issue;

pub use issue::*;
