//! First-match classification of request URIs.

use crate::category::SearchCategory;
use crate::error::Result;
use crate::matcher::{FieldMatch, PatternRule};
use crate::rules::CategoryRuleSet;

/// Fields that must carry a value when a rim rule declares them.
const REQUIRED_VEHICLE_FIELDS: [&str; 2] = ["carBrand", "carModel"];

/// Outcome of classifying a URI.
#[derive(Debug)]
pub enum Classification<'r, 't> {
    /// A rule matched and the line is accepted.
    Matched {
        category: SearchCategory,
        rule: &'r PatternRule,
        fields: FieldMatch<'t>,
    },
    /// A rule matched but failed the category's validity check.
    Rejected {
        category: SearchCategory,
        rule: &'r PatternRule,
    },
    /// No rule of any category matched.
    NoMatch,
}

impl<'r, 't> Classification<'r, 't> {
    /// Whether the URI was accepted.
    pub fn is_match(&self) -> bool {
        matches!(self, Classification::Matched { .. })
    }

    /// The category of the rule that fired, accepted or not.
    pub fn category(&self) -> Option<SearchCategory> {
        match self {
            Classification::Matched { category, .. } | Classification::Rejected { category, .. } => {
                Some(*category)
            }
            Classification::NoMatch => None,
        }
    }
}

/// Classifies URIs against an ordered [`CategoryRuleSet`].
///
/// Categories are tried in rule-set order and rules in list order; the first
/// rule that matches decides the outcome and nothing after it is tried.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: CategoryRuleSet,
}

impl Classifier {
    /// Create a classifier over the given rule set.
    pub fn new(rules: CategoryRuleSet) -> Self {
        Self { rules }
    }

    /// Create a classifier over the built-in vehicle search table.
    pub fn standard() -> Result<Self> {
        CategoryRuleSet::standard().map(Self::new)
    }

    /// The rule set in use.
    pub fn rules(&self) -> &CategoryRuleSet {
        &self.rules
    }

    /// Classify a URI.
    ///
    /// # Example
    ///
    /// ```rust
    /// use carlog::{Classifier, Classification, SearchCategory};
    ///
    /// let classifier = Classifier::standard()?;
    /// match classifier.classify("/oel/pkw/bmw") {
    ///     Classification::Matched { category, fields, .. } => {
    ///         assert_eq!(category, SearchCategory::Oil);
    ///         assert_eq!(fields.field("carBrand"), Some("bmw"));
    ///     }
    ///     other => panic!("unexpected {:?}", other),
    /// }
    /// # Ok::<(), carlog::Error>(())
    /// ```
    pub fn classify<'r, 't>(&'r self, uri: &'t str) -> Classification<'r, 't> {
        for (category, rules) in self.rules.iter() {
            for rule in rules {
                let Some(fields) = rule.try_match(uri) else {
                    continue;
                };

                if category.requires_vehicle() && missing_vehicle(rule, &fields) {
                    return Classification::Rejected { category, rule };
                }

                return Classification::Matched {
                    category,
                    rule,
                    fields,
                };
            }
        }

        Classification::NoMatch
    }
}

/// A declared brand or model group that is unmatched or empty.
fn missing_vehicle(rule: &PatternRule, fields: &FieldMatch<'_>) -> bool {
    REQUIRED_VEHICLE_FIELDS
        .iter()
        .filter(|name| rule.declares(name))
        .any(|name| fields.field(name).map_or(true, str::is_empty))
}
