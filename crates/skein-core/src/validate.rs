//! Structural validation for storylet records.
//!
//! Validation collects every violation instead of stopping at the first,
//! so authors fix a whole record in one pass.

use std::collections::HashSet;
use std::fmt;

use crate::storylet::Storylet;

/// The outcome of validating one storylet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Messages describing each violation, in discovery order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Whether the storylet passed every check.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join(", "))
    }
}

/// Check a storylet for structural problems.
///
/// A storylet needs a non-empty id and title, every option needs a
/// non-empty id and text, and option ids must be unique within the
/// storylet. Empty option ids are reported on their own and excluded
/// from the duplicate scan.
pub fn validate_storylet(storylet: &Storylet) -> ValidationReport {
    let mut errors = Vec::new();

    if storylet.id.is_empty() {
        errors.push("storylet id cannot be empty".to_string());
    }
    if storylet.title.is_empty() {
        errors.push("storylet title cannot be empty".to_string());
    }

    for (index, option) in storylet.options.iter().enumerate() {
        if option.id.is_empty() {
            errors.push(format!("option {index} has empty id"));
        }
        if option.text.is_empty() {
            errors.push(format!("option {index} ({}) has empty text", option.id));
        }
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for option in &storylet.options {
        if option.id.is_empty() {
            continue;
        }
        if !seen.insert(option.id.as_str()) && reported.insert(option.id.as_str()) {
            errors.push(format!("duplicate option id: {}", option.id));
        }
    }

    ValidationReport { errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storylet::StoryletOption;

    #[test]
    fn well_formed_storylet_passes() {
        let storylet = Storylet::new("crossroads", "The Crossroads")
            .with_option(StoryletOption::new("left", "Take the left path"))
            .with_option(StoryletOption::new("right", "Take the right path"));
        let report = validate_storylet(&storylet);
        assert!(report.is_valid());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn storylet_without_options_or_effects_is_still_valid() {
        let storylet = Storylet::new("a_quiet_evening", "A Quiet Evening");
        assert!(validate_storylet(&storylet).is_valid());
    }

    #[test]
    fn empty_id_is_reported() {
        let storylet = Storylet::new("", "The Crossroads");
        let report = validate_storylet(&storylet);
        assert_eq!(report.errors, vec!["storylet id cannot be empty"]);
    }

    #[test]
    fn empty_title_is_reported() {
        let storylet = Storylet::new("crossroads", "");
        let report = validate_storylet(&storylet);
        assert_eq!(report.errors, vec!["storylet title cannot be empty"]);
    }

    #[test]
    fn option_problems_name_the_offending_index() {
        let storylet = Storylet::new("crossroads", "The Crossroads")
            .with_option(StoryletOption::new("", "Go left"))
            .with_option(StoryletOption::new("right", ""));
        let report = validate_storylet(&storylet);
        assert_eq!(
            report.errors,
            vec![
                "option 0 has empty id".to_string(),
                "option 1 (right) has empty text".to_string(),
            ]
        );
    }

    #[test]
    fn duplicate_option_ids_are_reported_once_per_id() {
        let storylet = Storylet::new("crossroads", "The Crossroads")
            .with_option(StoryletOption::new("left", "Go left"))
            .with_option(StoryletOption::new("left", "Go left again"))
            .with_option(StoryletOption::new("left", "Keep going left"))
            .with_option(StoryletOption::new("right", "Go right"))
            .with_option(StoryletOption::new("right", "Go right again"));
        let report = validate_storylet(&storylet);
        assert_eq!(
            report.errors,
            vec![
                "duplicate option id: left".to_string(),
                "duplicate option id: right".to_string(),
            ]
        );
    }

    #[test]
    fn empty_option_ids_are_excluded_from_the_duplicate_scan() {
        let storylet = Storylet::new("crossroads", "The Crossroads")
            .with_option(StoryletOption::new("", "First unnamed"))
            .with_option(StoryletOption::new("", "Second unnamed"));
        let report = validate_storylet(&storylet);
        assert_eq!(
            report.errors,
            vec![
                "option 0 has empty id".to_string(),
                "option 1 has empty id".to_string(),
            ]
        );
    }

    #[test]
    fn all_violations_are_collected_together() {
        let storylet = Storylet::new("", "")
            .with_option(StoryletOption::new("", "Unnamed"))
            .with_option(StoryletOption::new("dup", "One"))
            .with_option(StoryletOption::new("dup", "Two"));
        let report = validate_storylet(&storylet);
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 4);
        assert!(report
            .errors
            .contains(&"storylet id cannot be empty".to_string()));
        assert!(report
            .errors
            .contains(&"storylet title cannot be empty".to_string()));
        assert!(report.errors.contains(&"option 0 has empty id".to_string()));
        assert!(report
            .errors
            .contains(&"duplicate option id: dup".to_string()));
    }

    #[test]
    fn report_display_joins_errors() {
        let storylet = Storylet::new("", "");
        let report = validate_storylet(&storylet);
        assert_eq!(
            report.to_string(),
            "storylet id cannot be empty, storylet title cannot be empty"
        );
    }
}
