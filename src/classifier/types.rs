//! Classification Types
//!
//! Core types for issue classification.
//! No logic here - only data structures.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORY
// ============================================================================

/// Top-level bucket an issue is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Equipment,
    Quality,
    #[serde(rename = "Supply Chain")]
    SupplyChain,
    Technical,
    /// No category keyword matched
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Equipment,
        Category::Quality,
        Category::SupplyChain,
        Category::Technical,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Equipment => "Equipment",
            Category::Quality => "Quality",
            Category::SupplyChain => "Supply Chain",
            Category::Technical => "Technical",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

// ============================================================================
// SEVERITY
// ============================================================================

/// Urgency tier. Declared least urgent first, so `Ord` rises with urgency
/// and `max()` picks the most urgent. Detection order lives in `rules::SEVERITY_RULES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str() == s)
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

/// Output of the engine for one piece of issue text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub severity: Severity,
    /// Extracted tokens, deduplicated
    pub entities: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert_eq!(
            serde_json::to_string(&Category::SupplyChain).unwrap(),
            "\"Supply Chain\""
        );
    }

    #[test]
    fn test_category_parse_is_exact() {
        assert!("equipment".parse::<Category>().is_err());
        assert!("SupplyChain".parse::<Category>().is_err());
    }

    #[test]
    fn test_severity_orders_by_urgency() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(Severity::ALL.into_iter().max(), Some(Severity::Critical));
        assert_eq!(
            [Severity::Low, Severity::Critical, Severity::Medium].into_iter().max(),
            Some(Severity::Critical)
        );
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_severity_parse_error_names_value() {
        let err = "urgent".parse::<Severity>().unwrap_err();
        assert_eq!(err.to_string(), "unknown severity: urgent");
    }
}
