//! Classification Rules
//!
//! Keyword tables for category and severity detection.
//! Only constants - the matching lives in `engine`.
//!
//! Tables are ordered slices: position decides tie-breaks (categories)
//! and priority (severity tiers).

use super::types::{Category, Severity};

// ============================================================================
// CATEGORY KEYWORDS
// ============================================================================

pub const EQUIPMENT_KEYWORDS: &[&str] = &[
    "motor", "machine", "equipment", "pump", "valve", "sensor",
    "conveyor", "robot", "bearing", "gear", "axis", "spindle",
    "overheating", "vibration", "noise", "malfunction", "breakdown",
];

pub const QUALITY_KEYWORDS: &[&str] = &[
    "qa", "quality", "defect", "failure", "reject", "inspection",
    "test", "pcb", "board", "solder", "assembly", "tolerance",
    "specification", "standard", "compliance", "rework",
];

pub const SUPPLY_CHAIN_KEYWORDS: &[&str] = &[
    "vendor", "supplier", "shipment", "delivery", "delay", "logistics",
    "procurement", "purchase", "order", "material", "component",
    "inventory", "stock", "shortage", "lead time",
];

pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "voltage", "current", "power", "circuit", "signal", "firmware",
    "software", "code", "error", "bug", "crash", "freeze",
    "network", "connection", "protocol", "data", "reading",
];

/// Scored categories in tie-break order. `Other` is the fallback and has no keywords.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Equipment, EQUIPMENT_KEYWORDS),
    (Category::Quality, QUALITY_KEYWORDS),
    (Category::SupplyChain, SUPPLY_CHAIN_KEYWORDS),
    (Category::Technical, TECHNICAL_KEYWORDS),
];

// ============================================================================
// SEVERITY KEYWORDS
// ============================================================================

pub const CRITICAL_KEYWORDS: &[&str] = &[
    "critical", "urgent", "emergency", "severe", "dangerous", "failure", "down", "stopped",
];

pub const HIGH_KEYWORDS: &[&str] = &[
    "major", "significant", "serious", "important", "damaged", "broken", "failed",
];

pub const MEDIUM_KEYWORDS: &[&str] = &[
    "moderate", "noticeable", "affecting", "impacting", "issue",
];

pub const LOW_KEYWORDS: &[&str] = &[
    "minor", "slight", "small", "observing", "noted", "monitoring",
];

/// Severity tiers in priority order; the first tier with a hit wins.
pub const SEVERITY_RULES: &[(Severity, &[&str])] = &[
    (Severity::Critical, CRITICAL_KEYWORDS),
    (Severity::High, HIGH_KEYWORDS),
    (Severity::Medium, MEDIUM_KEYWORDS),
    (Severity::Low, LOW_KEYWORDS),
];

// ============================================================================
// FALLBACK HEURISTICS (no tier keyword matched)
// ============================================================================

/// Punctuation in the raw text that escalates to High
pub const ESCALATION_MARK: char = '!';

/// Lower-cased words that escalate to High
pub const ESCALATION_WORDS: &[&str] = &["failed", "error"];

/// Punctuation that marks a question and de-escalates to Low
pub const QUESTION_MARK: char = '?';

/// Used when nothing else applies
pub const DEFAULT_SEVERITY: Severity = Severity::Medium;
