//! Compiled rule patterns and named-field lookup on their matches.

use crate::error::{Error, Result};
use fancy_regex::{Captures, Regex};
use tracing::warn;

/// Names of every capture group a rule may declare.
pub const FIELD_NAMES: [&str; 10] = [
    "carBrand",
    "carBrand2",
    "carModel",
    "carModel2",
    "carEngine",
    "vehicleType",
    "vehicleId",
    "vehicleSpec",
    "rimType",
    "rimSeason",
];

/// A single compiled URI pattern with named capture groups.
///
/// Rules use look-ahead assertions, so they are compiled with `fancy_regex`
/// rather than the linear-time `regex` engine.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    names: Vec<String>,
}

impl PatternRule {
    /// Compile a rule from its pattern source.
    ///
    /// # Example
    ///
    /// ```rust
    /// use carlog::PatternRule;
    ///
    /// let rule = PatternRule::new(r"^/oel/pkw/(?P<carBrand>.*)")?;
    /// let m = rule.try_match("/oel/pkw/bmw").unwrap();
    /// assert_eq!(m.field("carBrand"), Some("bmw"));
    /// assert_eq!(m.field("carModel"), None);
    /// # Ok::<(), carlog::Error>(())
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| Error::invalid_pattern(pattern, e))?;
        let names = regex
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();

        Ok(Self { regex, names })
    }

    /// The pattern source this rule was compiled from.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern declares a capture group with this name.
    pub fn declares(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Named groups declared by the pattern, in declaration order.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    /// Search the text for a match.
    ///
    /// A backtracking failure inside the engine counts as no match.
    pub fn try_match<'t>(&self, text: &'t str) -> Option<FieldMatch<'t>> {
        match self.regex.captures(text) {
            Ok(captures) => captures.map(|captures| FieldMatch { captures }),
            Err(e) => {
                warn!(pattern = self.as_str(), error = %e, "rule evaluation failed");
                None
            }
        }
    }
}

/// A successful match of a [`PatternRule`].
#[derive(Debug)]
pub struct FieldMatch<'t> {
    captures: Captures<'t>,
}

impl<'t> FieldMatch<'t> {
    /// Value of a named group.
    ///
    /// `None` when the pattern has no such group and also when the group
    /// exists but did not take part in the match.
    pub fn field(&self, name: &str) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_unmatched_groups_look_the_same() {
        let rule =
            PatternRule::new(r"^/rims/rim-selector\?(?=(?:.*type=(?P<rimType>[^&]*))?).*$")
                .unwrap();

        let m = rule.try_match("/rims/rim-selector?size=17").unwrap();
        assert_eq!(m.field("rimType"), None);
        assert_eq!(m.field("carBrand"), None);

        let m = rule.try_match("/rims/rim-selector?type=steel&size=17").unwrap();
        assert_eq!(m.field("rimType"), Some("steel"));
    }

    #[test]
    fn test_empty_group_is_some() {
        let rule = PatternRule::new(r"^/oel/pkw/(?P<carBrand>.*)").unwrap();
        let m = rule.try_match("/oel/pkw/").unwrap();
        assert_eq!(m.field("carBrand"), Some(""));
    }

    #[test]
    fn test_declares() {
        let rule = PatternRule::new(r"^/felgen/(?!.*-zoll)(?P<carBrand>.*)-felgen\.html").unwrap();
        assert!(rule.declares("carBrand"));
        assert!(!rule.declares("carModel"));
        assert_eq!(rule.capture_names().collect::<Vec<_>>(), ["carBrand"]);
    }

    #[test]
    fn test_negative_lookahead() {
        let rule = PatternRule::new(r"^/felgen/(?!.*-zoll)(?P<carBrand>.*)-felgen\.html").unwrap();
        assert!(rule.try_match("/felgen/17-zoll-felgen.html").is_none());
        assert!(rule.try_match("/felgen/audi-felgen.html").is_some());
    }

    #[test]
    fn test_no_match() {
        let rule = PatternRule::new(r"^/oel/pkw/?$").unwrap();
        assert!(rule.try_match("/oel/lkw").is_none());
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PatternRule::new(r"^/felgen/(?P<carBrand>.*");
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));
    }
}
