//! Issue Classifier
//!
//! Only the decision logic - tables live in `rules`, types in `types`.
//! Input: raw issue text
//! Output: ClassificationResult
//!
//! Pure and deterministic: same text, same result.

use super::entities::extract_entities;
use super::rules::{
    CATEGORY_RULES, DEFAULT_SEVERITY, ESCALATION_MARK, ESCALATION_WORDS, QUESTION_MARK,
    SEVERITY_RULES,
};
use super::types::{Category, ClassificationResult, Severity};

// ============================================================================
// MAIN CLASSIFICATION FUNCTION
// ============================================================================

/// Classify one piece of issue text.
///
/// Total over any string; blank text is rejected by callers before this point.
pub fn classify(text: &str) -> ClassificationResult {
    ClassificationResult {
        category: classify_category(text),
        severity: detect_severity(text),
        entities: extract_entities(text),
    }
}

// ============================================================================
// CATEGORY
// ============================================================================

/// Score = number of distinct keywords found as substrings.
/// Highest score wins; ties go to the category declared first.
pub fn classify_category(text: &str) -> Category {
    let text_lower = text.to_lowercase();

    let mut best: Option<(Category, usize)> = None;
    for (category, keywords) in CATEGORY_RULES {
        let score = keywords.iter().filter(|k| text_lower.contains(*k)).count();
        if score == 0 {
            continue;
        }
        // Strictly greater keeps the earlier category on ties
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((*category, score));
        }
    }

    best.map(|(category, _)| category).unwrap_or(Category::Other)
}

// ============================================================================
// SEVERITY
// ============================================================================

/// First tier with any keyword hit, then punctuation/word fallbacks.
pub fn detect_severity(text: &str) -> Severity {
    let text_lower = text.to_lowercase();

    for (severity, keywords) in SEVERITY_RULES {
        if keywords.iter().any(|k| text_lower.contains(k)) {
            return *severity;
        }
    }

    if text.contains(ESCALATION_MARK) || ESCALATION_WORDS.iter().any(|w| text_lower.contains(w)) {
        Severity::High
    } else if text.contains(QUESTION_MARK) {
        Severity::Low
    } else {
        DEFAULT_SEVERITY
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_motor_overheating() {
        let result = classify("Motor overheating after 3 hours");
        assert_eq!(result.category, Category::Equipment);
        assert_eq!(result.severity, Severity::Medium);
        assert_eq!(result.entities, set(&["3 hour"]));
    }

    #[test]
    fn test_pcb_board_failed_qa() {
        let result = classify("PCB board version 2 failed QA");
        assert_eq!(result.category, Category::Quality);
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.entities, set(&["v2", "PCB"]));
    }

    #[test]
    fn test_vendor_shipment_delay() {
        let result = classify("Delay in shipment from vendor Acme");
        assert_eq!(result.category, Category::SupplyChain);
        assert_eq!(result.severity, Severity::Medium);
        assert_eq!(result.entities, set(&["Acme"]));
    }

    #[test]
    fn test_critical_pump_failure() {
        // pump (Equipment) and failure (Quality) tie at 1; Equipment is declared first
        let result = classify("Critical pump failure in line A");
        assert_eq!(result.category, Category::Equipment);
        assert_eq!(result.severity, Severity::Critical);
        // The word before "pump" is taken as the component
        assert_eq!(result.entities, set(&["CRITICAL"]));
    }

    #[test]
    fn test_voltage_drop_at_node() {
        let result = classify("Voltage drop at node A causing errors");
        assert_eq!(result.category, Category::Technical);
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.entities, set(&["A"]));
    }

    #[test]
    fn test_no_keywords_is_other() {
        assert_eq!(classify_category("hello world"), Category::Other);
        assert_eq!(classify_category(""), Category::Other);
    }

    #[test]
    fn test_single_keyword_per_category() {
        assert_eq!(classify_category("the spindle"), Category::Equipment);
        assert_eq!(classify_category("needs rework"), Category::Quality);
        assert_eq!(classify_category("long lead time on castings"), Category::SupplyChain);
        assert_eq!(classify_category("firmware"), Category::Technical);
    }

    #[test]
    fn test_ties_go_to_earlier_category() {
        assert_eq!(classify_category("gear data"), Category::Equipment);
        assert_eq!(classify_category("data order"), Category::SupplyChain);
        assert_eq!(classify_category("solder stock"), Category::Quality);
    }

    #[test]
    fn test_score_counts_distinct_keywords() {
        // pump x3 scores 1, data + reading scores 2
        assert_eq!(classify_category("pump pump pump data reading"), Category::Technical);
    }

    #[test]
    fn test_substring_matching() {
        assert_eq!(classify_category("SPINDLED"), Category::Equipment);
    }

    #[test]
    fn test_severity_tier_priority() {
        assert_eq!(detect_severity("minor but critical leak"), Severity::Critical);
        assert_eq!(detect_severity("broken and minor"), Severity::High);
        assert_eq!(detect_severity("Network issues in Zone 3"), Severity::Medium);
        assert_eq!(detect_severity("Slight rattle"), Severity::Low);
    }

    #[test]
    fn test_severity_substring_quirk() {
        // "down" is inside "breakdown"
        assert_eq!(detect_severity("conveyor breakdown"), Severity::Critical);
    }

    #[test]
    fn test_severity_fallbacks() {
        assert_eq!(detect_severity("strange smell!"), Severity::High);
        assert_eq!(detect_severity("what caused the error?"), Severity::High);
        assert_eq!(detect_severity("is this normal?"), Severity::Low);
        assert_eq!(detect_severity("routine check"), Severity::Medium);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let text = "Solder defects in batch 450 from vendor Boardco!";
        assert_eq!(classify(text), classify(text));
    }
}
