//! Entity Extraction
//!
//! Five independent pattern rules run over the raw (not case-folded) text.
//! Each rule can be used alone through `EntityRule::extract`;
//! `extract_entities` unions all of them.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// PATTERNS (compiled once, read-only)
// ============================================================================

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)version\s+(\d+(?:\.\d+)*)").expect("version pattern"));

/// Case-sensitive on purpose: "Vendor Acme" does not match
static VENDOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"vendor\s+([A-Z][a-z]+)").expect("vendor pattern"));

static COMPONENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\w+)\s+(?:board|motor|pump|sensor|valve)").expect("component pattern")
});

static NODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)node\s+([A-Z]\d*)").expect("node pattern"));

/// No trailing boundary: "3 hours" yields "3 hour"
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s+(hour|minute|day|week|month)").expect("duration pattern")
});

// ============================================================================
// RULES
// ============================================================================

/// A single extraction rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRule {
    /// "version 2.1" -> "v2.1"
    Version,
    /// "vendor Acme" -> "Acme"
    Vendor,
    /// "PCB board" -> "PCB"
    Component,
    /// "node b7" -> "B7"
    Node,
    /// "3 hours" -> "3 hour"
    Duration,
}

impl EntityRule {
    pub const ALL: [EntityRule; 5] = [
        EntityRule::Version,
        EntityRule::Vendor,
        EntityRule::Component,
        EntityRule::Node,
        EntityRule::Duration,
    ];

    /// All matches of this rule, in text order (may contain duplicates)
    pub fn extract(&self, text: &str) -> Vec<String> {
        match self {
            EntityRule::Version => VERSION_RE
                .captures_iter(text)
                .map(|c| format!("v{}", &c[1]))
                .collect(),
            EntityRule::Vendor => VENDOR_RE
                .captures_iter(text)
                .map(|c| c[1].to_string())
                .collect(),
            EntityRule::Component => COMPONENT_RE
                .captures_iter(text)
                .map(|c| c[1].to_uppercase())
                .collect(),
            EntityRule::Node => NODE_RE
                .captures_iter(text)
                .map(|c| c[1].to_uppercase())
                .collect(),
            EntityRule::Duration => DURATION_RE
                .captures_iter(text)
                .map(|c| format!("{} {}", &c[1], &c[2]))
                .collect(),
        }
    }
}

/// Run every rule and deduplicate
pub fn extract_entities(text: &str) -> BTreeSet<String> {
    EntityRule::ALL
        .iter()
        .flat_map(|rule| rule.extract(text))
        .collect()
}
