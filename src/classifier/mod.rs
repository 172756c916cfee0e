//! Classifier Module
//!
//! Turns free-text issue reports into a category, a severity and a set of
//! extracted entities. Rule based, no hidden state.
//!
//! ## Structure
//! - `types`: Category, Severity, ClassificationResult
//! - `rules`: keyword tables and fallback constants
//! - `entities`: the five pattern extractors
//! - `engine`: category scoring and severity detection
//!
//! ## Usage
//! ```ignore
//! use crate::classifier::{classify, Category};
//!
//! let result = classify("Motor overheating after 3 hours");
//! assert_eq!(result.category, Category::Equipment);
//! ```

pub mod types;
pub mod rules;
pub mod entities;
pub mod engine;

pub use types::{Category, ClassificationResult, Severity};
pub use engine::classify;
